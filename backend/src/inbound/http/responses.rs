//! Shared response payloads for the HTTP adapter.
//!
//! Handlers never serialise domain types directly; these wrappers fix the
//! wire shape (camelCase, RFC 3339 timestamps, `YYYY-MM-DD` days) so domain
//! refactors cannot silently change the API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Category, Habit, HabitLog, HabitOverview, HabitStats, User};

/// Habit category as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Health")]
    pub name: String,
    #[schema(example = "\u{1f4aa}")]
    pub icon: String,
    #[schema(example = "#10B981")]
    pub color: String,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            icon: value.icon,
            color: value.color,
        }
    }
}

/// Derived statistics over a habit's completion logs.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatsResponse {
    /// Consecutive days completed, counting back from today.
    #[schema(example = 5)]
    pub current_streak: u32,
    /// Percentage of the trailing rate window with a completion.
    #[schema(example = 71)]
    pub completion_rate: u8,
    pub completed_today: bool,
    /// Number of logs in the fetched window.
    pub total_logs: u32,
}

impl From<HabitStats> for HabitStatsResponse {
    fn from(value: HabitStats) -> Self {
        Self {
            current_streak: value.current_streak,
            completion_rate: value.completion_rate,
            completed_today: value.completed_today,
            total_logs: value.total_logs,
        }
    }
}

/// One recorded completion.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitLogResponse {
    pub id: String,
    pub habit_id: String,
    /// UTC calendar day of the completion.
    #[schema(example = "2024-01-05")]
    pub completed_date: String,
    pub notes: Option<String>,
}

impl From<HabitLog> for HabitLogResponse {
    fn from(value: HabitLog) -> Self {
        Self {
            id: value.id.to_string(),
            habit_id: value.habit_id.to_string(),
            completed_date: value.completed_on.to_string(),
            notes: value.notes,
        }
    }
}

/// A habit joined with its category, recent logs, and derived stats.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub id: String,
    pub user_id: String,
    #[schema(example = "Read")]
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub is_active: bool,
    #[schema(example = "2024-01-01T09:00:00+00:00")]
    pub created_at: String,
    pub category: CategoryResponse,
    /// Logs newest first.
    pub logs: Vec<HabitLogResponse>,
    pub stats: HabitStatsResponse,
}

fn habit_response(habit: Habit, category: Category, logs: Vec<HabitLog>, stats: HabitStats) -> HabitResponse {
    HabitResponse {
        id: habit.id.to_string(),
        user_id: habit.user_id.to_string(),
        name: habit.name,
        description: habit.description,
        color: habit.color,
        is_active: habit.is_active,
        created_at: habit.created_at.to_rfc3339(),
        category: CategoryResponse::from(category),
        logs: logs.into_iter().map(HabitLogResponse::from).collect(),
        stats: HabitStatsResponse::from(stats),
    }
}

impl From<HabitOverview> for HabitResponse {
    fn from(value: HabitOverview) -> Self {
        habit_response(value.habit, value.category, value.logs, value.stats)
    }
}

/// Stored user profile.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "auth0|5f7c8ec7c33c6c004bbafe82")]
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            email: value.email,
            name: value.name,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{CategoryId, HabitId, HabitLogId, UserId};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    fn habit_response_serialises_camel_case() {
        let category = Category {
            id: CategoryId::random(),
            name: "Health".to_owned(),
            icon: "\u{1f4aa}".to_owned(),
            color: "#10B981".to_owned(),
        };
        let overview = HabitOverview {
            habit: Habit {
                id: HabitId::random(),
                user_id: UserId::new("auth0|tester").expect("user id"),
                name: "Read".to_owned(),
                description: None,
                category_id: category.id,
                color: "#10B981".to_owned(),
                is_active: true,
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            },
            category,
            logs: vec![HabitLog {
                id: HabitLogId::random(),
                habit_id: HabitId::random(),
                completed_on: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
                notes: None,
            }],
            stats: HabitStats {
                current_streak: 5,
                completion_rate: 71,
                completed_today: true,
                total_logs: 5,
            },
        };

        let value = serde_json::to_value(HabitResponse::from(overview)).expect("serialise");
        assert_eq!(value["isActive"], true);
        assert_eq!(value["stats"]["currentStreak"], 5);
        assert_eq!(value["stats"]["completionRate"], 71);
        assert_eq!(value["logs"][0]["completedDate"], "2024-01-05");
        assert_eq!(value["createdAt"], "2024-01-01T09:00:00+00:00");
    }

    #[rstest]
    fn user_response_copies_profile_fields() {
        let now = Utc::now();
        let response = UserResponse::from(User {
            id: UserId::new("auth0|tester").expect("user id"),
            email: "ada@example.com".to_owned(),
            name: Some("Ada".to_owned()),
            created_at: now,
            updated_at: now,
        });

        assert_eq!(response.id, "auth0|tester");
        assert_eq!(response.email, "ada@example.com");
        assert_eq!(response.created_at, now.to_rfc3339());
    }
}
