//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod error;
pub mod habit_logs;
pub mod habits;
pub mod health;
pub mod responses;
pub mod state;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;
