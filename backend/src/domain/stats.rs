//! Derived habit statistics.
//!
//! Pure computation over a habit's fetched completion logs and a
//! caller-supplied "today". Nothing here touches storage; the caller decides
//! how much history to fetch, and days outside the fetched window are
//! invisible to the derivation. The streak scan itself has no depth limit,
//! so its accuracy is bounded by the fetch window (the list view fetches
//! [`DEFAULT_FETCH_WINDOW_DAYS`]).

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::habit_log::HabitLog;

/// Days of history fetched for the list view's stat derivation.
pub const DEFAULT_FETCH_WINDOW_DAYS: u32 = 30;

/// Window used for the trailing completion-rate computation.
pub const DEFAULT_RATE_WINDOW_DAYS: u32 = 7;

/// Statistics derived from a habit's completion logs.
///
/// Recomputed fresh on every fetch; never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    /// Consecutive days with a log, counting backward from today.
    pub current_streak: u32,
    /// Percentage of the trailing rate window with a log, rounded to the
    /// nearest integer in `[0, 100]`.
    pub completion_rate: u8,
    /// Whether a log exists for today.
    pub completed_today: bool,
    /// Number of logs in the fetched window.
    pub total_logs: u32,
}

/// Derive streak, completion rate, and completed-today from `logs`.
///
/// `logs` may arrive in any order; duplicate days cannot occur (storage
/// enforces one log per day) but would be tolerated. `today` is the UTC
/// calendar day supplied by the caller, and `rate_window_days` is the
/// trailing window for the completion rate (zero yields a rate of 0).
pub fn derive_stats(logs: &[HabitLog], today: NaiveDate, rate_window_days: u32) -> HabitStats {
    let days: HashSet<NaiveDate> = logs.iter().map(|log| log.completed_on).collect();

    let mut current_streak: u32 = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        current_streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(previous) => cursor = previous,
            None => break,
        }
    }

    let completed_in_window = (0..rate_window_days)
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .filter(|day| days.contains(day))
        .count();
    let completion_rate = rate_percentage(completed_in_window, rate_window_days);

    HabitStats {
        current_streak,
        completion_rate,
        completed_today: days.contains(&today),
        total_logs: u32::try_from(logs.len()).unwrap_or(u32::MAX),
    }
}

/// Round `100 * completed / window` to the nearest integer percentage.
fn rate_percentage(completed: usize, window_days: u32) -> u8 {
    if window_days == 0 {
        return 0;
    }
    let completed = u64::try_from(completed).unwrap_or(u64::MAX).min(u64::from(window_days));
    let window = u64::from(window_days);
    let rounded = (completed * 100 + window / 2) / window;
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    //! Properties from the behaviour contract: empty history, full weeks,
    //! streak runs with gaps, and the documented 5-of-7 scenario.
    use super::*;
    use crate::domain::habit::HabitId;
    use crate::domain::habit_log::HabitLogId;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn logs_for_days(days: &[NaiveDate]) -> Vec<HabitLog> {
        let habit_id = HabitId::random();
        days.iter()
            .map(|completed_on| HabitLog {
                id: HabitLogId::random(),
                habit_id,
                completed_on: *completed_on,
                notes: None,
            })
            .collect()
    }

    #[rstest]
    fn zero_logs_derive_zeroes() {
        let stats = derive_stats(&[], day(2024, 1, 5), DEFAULT_RATE_WINDOW_DAYS);
        assert_eq!(stats, HabitStats::default());
    }

    #[rstest]
    fn full_week_scores_one_hundred() {
        let today = day(2024, 1, 7);
        let days: Vec<NaiveDate> = (1..=7).map(|d| day(2024, 1, d)).collect();
        let stats = derive_stats(&logs_for_days(&days), today, 7);
        assert_eq!(stats.completion_rate, 100);
        assert_eq!(stats.current_streak, 7);
        assert!(stats.completed_today);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(10)]
    fn streak_counts_consecutive_days_until_gap(#[case] run_length: u32) {
        let today = day(2024, 3, 20);
        let mut days: Vec<NaiveDate> = (0..run_length)
            .map(|offset| today - Days::new(u64::from(offset)))
            .collect();
        // A gap, then an older log that must not extend the streak.
        days.push(today - Days::new(u64::from(run_length) + 1));
        let stats = derive_stats(&logs_for_days(&days), today, 7);
        assert_eq!(stats.current_streak, run_length);
    }

    #[rstest]
    fn streak_is_zero_without_a_log_today() {
        let today = day(2024, 3, 20);
        let days = [today - Days::new(1), today - Days::new(2)];
        let stats = derive_stats(&logs_for_days(&days), today, 7);
        assert_eq!(stats.current_streak, 0);
        assert!(!stats.completed_today);
        // Two of the last seven days are covered.
        assert_eq!(stats.completion_rate, 29);
    }

    #[rstest]
    fn five_consecutive_days_rate_rounds_to_seventy_one() {
        let today = day(2024, 1, 5);
        let days: Vec<NaiveDate> = (1..=5).map(|d| day(2024, 1, d)).collect();
        let stats = derive_stats(&logs_for_days(&days), today, 7);
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.completion_rate, 71);
        assert!(stats.completed_today);
        assert_eq!(stats.total_logs, 5);
    }

    #[rstest]
    fn logs_outside_rate_window_do_not_affect_rate() {
        let today = day(2024, 2, 1);
        let days = [day(2024, 1, 1), day(2024, 1, 2)];
        let stats = derive_stats(&logs_for_days(&days), today, 7);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.total_logs, 2);
    }

    #[rstest]
    fn unordered_input_derives_the_same_stats() {
        let today = day(2024, 1, 5);
        let mut days: Vec<NaiveDate> = (1..=5).map(|d| day(2024, 1, d)).collect();
        days.reverse();
        let stats = derive_stats(&logs_for_days(&days), today, 7);
        assert_eq!(stats.current_streak, 5);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(6, 86)]
    #[case(7, 100)]
    fn rate_rounds_to_nearest_integer(#[case] completed: usize, #[case] expected: u8) {
        assert_eq!(rate_percentage(completed, 7), expected);
    }

    #[rstest]
    fn zero_window_yields_zero_rate() {
        assert_eq!(rate_percentage(3, 0), 0);
    }
}
