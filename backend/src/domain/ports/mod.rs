//! Driven ports: repository traits the outbound adapters implement.

pub(crate) mod macros;

mod category_repository;
mod habit_log_repository;
mod habit_repository;
mod user_repository;

pub use category_repository::{CategoryPersistenceError, CategoryRepository};
pub use habit_log_repository::{HabitLogPersistenceError, HabitLogRepository};
pub use habit_repository::{HabitPersistenceError, HabitRepository};
pub use user_repository::{UserPersistenceError, UserRepository};
