//! Port abstraction for completion-log persistence adapters and their errors.
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::habit::HabitId;
use crate::domain::habit_log::{HabitLog, LogQuery, NewHabitLog};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by completion-log repository adapters.
    pub enum HabitLogPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "habit log repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "habit log repository query failed: {message}",
        /// A log already exists for this habit and calendar day. The
        /// database uniqueness constraint raises this for racing check-ins.
        DuplicateDay { day: NaiveDate } => "completion already recorded for {day}",
    }
}

#[async_trait]
pub trait HabitLogRepository: Send + Sync {
    /// Insert a completion log, failing with
    /// [`HabitLogPersistenceError::DuplicateDay`] when the (habit, day)
    /// pair is already recorded.
    async fn insert(&self, log: &NewHabitLog) -> Result<HabitLog, HabitLogPersistenceError>;

    /// Delete the log for an exact calendar day.
    ///
    /// Returns whether a row was deleted.
    async fn delete_by_day(
        &self,
        habit_id: &HabitId,
        day: NaiveDate,
    ) -> Result<bool, HabitLogPersistenceError>;

    /// List a habit's logs, newest first, bounded by the query.
    async fn list(
        &self,
        habit_id: &HabitId,
        query: LogQuery,
    ) -> Result<Vec<HabitLog>, HabitLogPersistenceError>;
}
