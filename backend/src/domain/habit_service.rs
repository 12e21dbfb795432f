//! Habit use-case service.
//!
//! Orchestrates the repositories behind every habit endpoint: ownership
//! checks, category lookups, check-in / undo, and the per-habit stat
//! derivation over a trailing fetch window. "Today" comes from an injected
//! [`Clock`] so tests control the calendar.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error};

use super::category::{Category, CategoryId};
use super::error::Error;
use super::filter::HabitFilter;
use super::habit::{Habit, HabitChanges, HabitId, NewHabit};
use super::habit_log::{HabitLog, LogQuery, NewHabitLog};
use super::ports::{
    CategoryPersistenceError, CategoryRepository, HabitLogPersistenceError, HabitLogRepository,
    HabitPersistenceError, HabitRepository, UserPersistenceError, UserRepository,
};
use super::stats::{derive_stats, HabitStats, DEFAULT_FETCH_WINDOW_DAYS, DEFAULT_RATE_WINDOW_DAYS};
use super::user::UserId;

/// A habit joined with its category, fetched logs, and derived stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitOverview {
    pub habit: Habit,
    pub category: Category,
    /// Logs within the fetched window, newest first.
    pub logs: Vec<HabitLog>,
    pub stats: HabitStats,
}

/// Input for habit creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHabitRequest {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub color: Option<String>,
}

/// Input for a check-in. The day defaults to today when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInRequest {
    pub user_id: UserId,
    pub habit_id: HabitId,
    pub day: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Habit use-case service backing the HTTP adapters.
#[derive(Clone)]
pub struct HabitService {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    habits: Arc<dyn HabitRepository>,
    logs: Arc<dyn HabitLogRepository>,
    clock: Arc<dyn Clock>,
}

fn habit_not_found() -> Error {
    // Ownership misses deliberately read as NotFound so callers cannot
    // probe for other users' habit identifiers.
    Error::not_found("habit not found")
}

fn map_user_error(error: UserPersistenceError) -> Error {
    error!(%error, "user repository failure");
    Error::internal(error.to_string())
}

fn map_category_error(error: CategoryPersistenceError) -> Error {
    error!(%error, "category repository failure");
    Error::internal(error.to_string())
}

fn map_habit_error(error: HabitPersistenceError) -> Error {
    error!(%error, "habit repository failure");
    Error::internal(error.to_string())
}

fn map_log_error(error: HabitLogPersistenceError) -> Error {
    match error {
        HabitLogPersistenceError::DuplicateDay { day } => {
            Error::conflict("habit already completed for this date")
                .with_details(json!({ "completedDate": day.to_string() }))
        }
        other => {
            error!(error = %other, "habit log repository failure");
            Error::internal(other.to_string())
        }
    }
}

impl HabitService {
    /// Assemble the service from its driven ports and a clock.
    pub fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        habits: Arc<dyn HabitRepository>,
        logs: Arc<dyn HabitLogRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            categories,
            habits,
            logs,
            clock,
        }
    }

    /// The current UTC calendar day.
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// List every category, ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.categories.list().await.map_err(map_category_error)
    }

    /// List the user's active habits with derived stats, newest first,
    /// refined by `filter`.
    ///
    /// Fetches a trailing window of [`DEFAULT_FETCH_WINDOW_DAYS`] logs per
    /// habit (one query per habit), so streaks longer than the window are
    /// reported as the window length.
    pub async fn list_habits(
        &self,
        user_id: &UserId,
        filter: &HabitFilter,
    ) -> Result<Vec<HabitOverview>, Error> {
        let today = self.today();
        let habits = self
            .habits
            .list_active(user_id)
            .await
            .map_err(map_habit_error)?;
        let categories = self.category_index().await?;

        let mut overviews = Vec::with_capacity(habits.len());
        for habit in habits {
            let logs = self
                .logs
                .list(
                    &habit.id,
                    LogQuery::trailing_window(today, DEFAULT_FETCH_WINDOW_DAYS),
                )
                .await
                .map_err(map_log_error)?;
            let stats = derive_stats(&logs, today, DEFAULT_RATE_WINDOW_DAYS);
            if !filter.matches(&habit, &stats) {
                continue;
            }
            let category = self.category_for(&categories, &habit)?;
            overviews.push(HabitOverview {
                habit,
                category,
                logs,
                stats,
            });
        }
        debug!(user_id = %user_id, count = overviews.len(), "listed habits");
        Ok(overviews)
    }

    /// Fetch one owned habit with its full log history and derived stats.
    pub async fn get_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<HabitOverview, Error> {
        let habit = self.find_owned(habit_id, user_id).await?;
        let category = self.require_category(&habit.category_id).await?;
        let logs = self
            .logs
            .list(&habit.id, LogQuery::default())
            .await
            .map_err(map_log_error)?;
        let stats = derive_stats(&logs, self.today(), DEFAULT_RATE_WINDOW_DAYS);
        Ok(HabitOverview {
            habit,
            category,
            logs,
            stats,
        })
    }

    /// Create a habit for an existing user in an existing category.
    ///
    /// The colour falls back to the category's colour when absent.
    pub async fn create_habit(&self, request: CreateHabitRequest) -> Result<HabitOverview, Error> {
        let user = self
            .users
            .find_by_id(&request.user_id)
            .await
            .map_err(map_user_error)?;
        if user.is_none() {
            return Err(Error::not_found("user not found"));
        }
        let category = self.require_category(&request.category_id).await?;

        let color = request.color.unwrap_or_else(|| category.color.clone());
        let habit = self
            .habits
            .insert(&NewHabit {
                user_id: request.user_id,
                name: request.name,
                description: request.description,
                category_id: request.category_id,
                color: Some(color),
            })
            .await
            .map_err(map_habit_error)?;
        debug!(habit_id = %habit.id, "created habit");
        // A fresh habit has no logs yet, so the stats are all zero.
        Ok(HabitOverview {
            habit,
            category,
            logs: Vec::new(),
            stats: HabitStats::default(),
        })
    }

    /// Apply a partial update to an owned habit.
    pub async fn update_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        changes: HabitChanges,
    ) -> Result<HabitOverview, Error> {
        if let Some(category_id) = &changes.category_id {
            self.require_category(category_id).await?;
        }
        let habit = self
            .habits
            .update(habit_id, user_id, &changes)
            .await
            .map_err(map_habit_error)?
            .ok_or_else(habit_not_found)?;
        let category = self.require_category(&habit.category_id).await?;
        let logs = self
            .logs
            .list(&habit.id, LogQuery::default())
            .await
            .map_err(map_log_error)?;
        let stats = derive_stats(&logs, self.today(), DEFAULT_RATE_WINDOW_DAYS);
        Ok(HabitOverview {
            habit,
            category,
            logs,
            stats,
        })
    }

    /// Delete an owned habit; its logs cascade away with it.
    pub async fn delete_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<(), Error> {
        let deleted = self
            .habits
            .delete(habit_id, user_id)
            .await
            .map_err(map_habit_error)?;
        if !deleted {
            return Err(habit_not_found());
        }
        debug!(habit_id = %habit_id, "deleted habit");
        Ok(())
    }

    /// Record a completion for an owned habit.
    ///
    /// Idempotent per day in the failure-signalling sense: a second check-in
    /// for the same day returns Conflict. The pre-check keeps the common
    /// path friendly; the storage uniqueness constraint decides races.
    pub async fn check_in(&self, request: CheckInRequest) -> Result<HabitLog, Error> {
        let habit = self.find_owned(&request.habit_id, &request.user_id).await?;
        let day = request.day.unwrap_or_else(|| self.today());

        let existing = self
            .logs
            .list(
                &habit.id,
                LogQuery {
                    start: Some(day),
                    end: Some(day),
                    limit: Some(1),
                },
            )
            .await
            .map_err(map_log_error)?;
        if !existing.is_empty() {
            return Err(Error::conflict("habit already completed for this date")
                .with_details(json!({ "completedDate": day.to_string() })));
        }

        let log = self
            .logs
            .insert(&NewHabitLog {
                habit_id: habit.id,
                completed_on: day,
                notes: request.notes,
            })
            .await
            .map_err(map_log_error)?;
        debug!(habit_id = %habit.id, day = %day, "recorded completion");
        Ok(log)
    }

    /// Undo the completion for an exact calendar day.
    pub async fn undo_check_in(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        day: NaiveDate,
    ) -> Result<(), Error> {
        let habit = self.find_owned(habit_id, user_id).await?;
        let deleted = self
            .logs
            .delete_by_day(&habit.id, day)
            .await
            .map_err(map_log_error)?;
        if !deleted {
            return Err(Error::not_found("no completion recorded for this date")
                .with_details(json!({ "completedDate": day.to_string() })));
        }
        debug!(habit_id = %habit_id, day = %day, "removed completion");
        Ok(())
    }

    /// List an owned habit's logs, newest first, bounded by `query`.
    pub async fn list_logs(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        query: LogQuery,
    ) -> Result<Vec<HabitLog>, Error> {
        let habit = self.find_owned(habit_id, user_id).await?;
        self.logs
            .list(&habit.id, query)
            .await
            .map_err(map_log_error)
    }

    async fn find_owned(&self, habit_id: &HabitId, user_id: &UserId) -> Result<Habit, Error> {
        self.habits
            .find_owned(habit_id, user_id)
            .await
            .map_err(map_habit_error)?
            .ok_or_else(habit_not_found)
    }

    async fn require_category(&self, category_id: &CategoryId) -> Result<Category, Error> {
        self.categories
            .find_by_id(category_id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found("category not found"))
    }

    async fn category_index(&self) -> Result<HashMap<CategoryId, Category>, Error> {
        let categories = self.categories.list().await.map_err(map_category_error)?;
        Ok(categories
            .into_iter()
            .map(|category| (category.id, category))
            .collect())
    }

    fn category_for(
        &self,
        index: &HashMap<CategoryId, Category>,
        habit: &Habit,
    ) -> Result<Category, Error> {
        index.get(&habit.category_id).cloned().ok_or_else(|| {
            error!(habit_id = %habit.id, category_id = %habit.category_id, "dangling category reference");
            Error::internal("habit references a missing category")
        })
    }
}
