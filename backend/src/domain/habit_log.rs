//! Completion logs and the calendar-day policy.
//!
//! A calendar day is the UTC day. Incoming timestamps are converted to UTC
//! and truncated; storage keys and derived-stat computation use the same
//! truncated value, so the day boundary is unambiguous end to end.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::habit::HabitId;

/// Completion log identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitLogId(Uuid);

impl HabitLogId {
    /// Wrap an existing UUID.
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for HabitLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Truncate a UTC timestamp to its calendar day.
pub fn day_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Evidence that a habit was performed on a specific calendar day.
///
/// ## Invariants
/// - At most one log exists per (habit, day) pair; the storage layer
///   enforces this with a composite uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    /// Stable identifier.
    pub id: HabitLogId,
    /// The habit this log belongs to.
    pub habit_id: HabitId,
    /// The UTC calendar day the habit was completed on.
    pub completed_on: NaiveDate,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Input payload for a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabitLog {
    pub habit_id: HabitId,
    pub completed_on: NaiveDate,
    pub notes: Option<String>,
}

/// Query bounds for listing a habit's logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogQuery {
    /// Earliest day to include (inclusive).
    pub start: Option<NaiveDate>,
    /// Latest day to include (inclusive).
    pub end: Option<NaiveDate>,
    /// Maximum number of logs to return, newest first.
    pub limit: Option<u32>,
}

impl LogQuery {
    /// Query for the trailing window of `window_days` days ending at `today`.
    ///
    /// A window of zero days yields an empty range.
    pub fn trailing_window(today: NaiveDate, window_days: u32) -> Self {
        let start = if window_days == 0 {
            today
        } else {
            today - chrono::Days::new(u64::from(window_days) - 1)
        };
        Self {
            start: Some(start),
            end: Some(today),
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn day_of_truncates_to_utc_date() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap();
        assert_eq!(
            day_of(timestamp),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[rstest]
    fn trailing_window_includes_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let query = LogQuery::trailing_window(today, 30);
        assert_eq!(query.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(query.end, Some(today));
    }

    #[rstest]
    fn trailing_window_of_one_day_is_today_only() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let query = LogQuery::trailing_window(today, 1);
        assert_eq!(query.start, Some(today));
        assert_eq!(query.end, Some(today));
    }
}
