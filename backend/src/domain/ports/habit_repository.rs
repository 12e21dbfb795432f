//! Port abstraction for habit persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::habit::{Habit, HabitChanges, HabitId, NewHabit};
use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by habit repository adapters.
    pub enum HabitPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "habit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "habit repository query failed: {message}",
    }
}

/// Habit persistence port.
///
/// Every read and mutation is scoped by the owning user; a habit that exists
/// but belongs to someone else behaves exactly like a missing habit so
/// adapters cannot leak existence.
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Insert a new habit and return the stored row.
    async fn insert(&self, habit: &NewHabit) -> Result<Habit, HabitPersistenceError>;

    /// Fetch a habit owned by `owner`.
    async fn find_owned(
        &self,
        id: &HabitId,
        owner: &UserId,
    ) -> Result<Option<Habit>, HabitPersistenceError>;

    /// List the user's active habits, newest first.
    async fn list_active(&self, owner: &UserId) -> Result<Vec<Habit>, HabitPersistenceError>;

    /// Apply a partial update to a habit owned by `owner`.
    ///
    /// Returns the updated habit, or `None` when no owned habit matches.
    async fn update(
        &self,
        id: &HabitId,
        owner: &UserId,
        changes: &HabitChanges,
    ) -> Result<Option<Habit>, HabitPersistenceError>;

    /// Delete a habit owned by `owner`, cascading its logs.
    ///
    /// Returns whether a row was deleted.
    async fn delete(&self, id: &HabitId, owner: &UserId) -> Result<bool, HabitPersistenceError>;
}
