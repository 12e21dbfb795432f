//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters only: each repository translates between Diesel row models
//! and domain types, and maps database failures to the port error types. No
//! business logic lives here. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay internal to this module.

mod diesel_category_repository;
mod diesel_habit_log_repository;
mod diesel_habit_repository;
mod diesel_user_repository;
mod migrate;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_habit_log_repository::DieselHabitLogRepository;
pub use diesel_habit_repository::DieselHabitRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrate::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};
