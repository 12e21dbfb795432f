//! PostgreSQL-backed `HabitLogRepository` implementation using Diesel ORM.
//!
//! The composite uniqueness constraint on (habit_id, completed_on) is the
//! arbiter for racing same-day check-ins: the losing insert surfaces as
//! [`HabitLogPersistenceError::DuplicateDay`].

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{HabitLogPersistenceError, HabitLogRepository};
use crate::domain::{HabitId, HabitLog, HabitLogId, LogQuery, NewHabitLog};

use super::models::{HabitLogRow, NewHabitLogRow};
use super::pool::{DbPool, PoolError};
use super::schema::habit_logs;

/// Diesel-backed implementation of the `HabitLogRepository` port.
#[derive(Clone)]
pub struct DieselHabitLogRepository {
    pool: DbPool,
}

impl DieselHabitLogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HabitLogPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            HabitLogPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> HabitLogPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            HabitLogPersistenceError::connection("database connection error")
        }
        _ => HabitLogPersistenceError::query("database error"),
    }
}

fn map_insert_error(error: diesel::result::Error, day: NaiveDate) -> HabitLogPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = error {
        return HabitLogPersistenceError::duplicate_day(day);
    }
    map_diesel_error(error)
}

fn row_to_log(row: HabitLogRow) -> HabitLog {
    HabitLog {
        id: HabitLogId::from_uuid(row.id),
        habit_id: HabitId::from_uuid(row.habit_id),
        completed_on: row.completed_on,
        notes: row.notes,
    }
}

#[async_trait]
impl HabitLogRepository for DieselHabitLogRepository {
    async fn insert(&self, log: &NewHabitLog) -> Result<HabitLog, HabitLogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewHabitLogRow {
            id: Uuid::new_v4(),
            habit_id: *log.habit_id.as_uuid(),
            completed_on: log.completed_on,
            notes: log.notes.as_deref(),
        };

        let row: HabitLogRow = diesel::insert_into(habit_logs::table)
            .values(&new_row)
            .returning(HabitLogRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, log.completed_on))?;

        Ok(row_to_log(row))
    }

    async fn delete_by_day(
        &self,
        habit_id: &HabitId,
        day: NaiveDate,
    ) -> Result<bool, HabitLogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            habit_logs::table
                .filter(habit_logs::habit_id.eq(habit_id.as_uuid()))
                .filter(habit_logs::completed_on.eq(day)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list(
        &self,
        habit_id: &HabitId,
        query: LogQuery,
    ) -> Result<Vec<HabitLog>, HabitLogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = habit_logs::table
            .filter(habit_logs::habit_id.eq(habit_id.as_uuid()))
            .order(habit_logs::completed_on.desc())
            .select(HabitLogRow::as_select())
            .into_boxed();
        if let Some(start) = query.start {
            statement = statement.filter(habit_logs::completed_on.ge(start));
        }
        if let Some(end) = query.end {
            statement = statement.filter(habit_logs::completed_on.le(end));
        }
        if let Some(limit) = query.limit {
            statement = statement.limit(i64::from(limit));
        }

        let rows: Vec<HabitLogRow> = statement.load(&mut conn).await.map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_log).collect())
    }
}
