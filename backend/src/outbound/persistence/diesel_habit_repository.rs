//! PostgreSQL-backed `HabitRepository` implementation using Diesel ORM.
//!
//! Every query filters on the owning user as well as the habit id, so a
//! habit owned by someone else is indistinguishable from a missing one.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{HabitPersistenceError, HabitRepository};
use crate::domain::{CategoryId, Habit, HabitChanges, HabitId, NewHabit, UserId};

use super::models::{HabitChangesRow, HabitRow, NewHabitRow};
use super::pool::{DbPool, PoolError};
use super::schema::habits;

/// Diesel-backed implementation of the `HabitRepository` port.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HabitPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            HabitPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> HabitPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            HabitPersistenceError::connection("database connection error")
        }
        _ => HabitPersistenceError::query("database error"),
    }
}

fn row_to_habit(row: HabitRow) -> Result<Habit, HabitPersistenceError> {
    let user_id = UserId::new(row.user_id)
        .map_err(|_| HabitPersistenceError::query("stored habit owner id is blank"))?;
    Ok(Habit {
        id: HabitId::from_uuid(row.id),
        user_id,
        name: row.name,
        description: row.description,
        category_id: CategoryId::from_uuid(row.category_id),
        color: row.color,
        is_active: row.is_active,
        created_at: row.created_at,
    })
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn insert(&self, habit: &NewHabit) -> Result<Habit, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let color = habit
            .color
            .as_deref()
            .ok_or_else(|| HabitPersistenceError::query("habit colour must be resolved"))?;
        let new_row = NewHabitRow {
            id: Uuid::new_v4(),
            user_id: habit.user_id.as_str(),
            name: habit.name.as_str(),
            description: habit.description.as_deref(),
            category_id: *habit.category_id.as_uuid(),
            color,
        };

        let row: HabitRow = diesel::insert_into(habits::table)
            .values(&new_row)
            .returning(HabitRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_habit(row)
    }

    async fn find_owned(
        &self,
        id: &HabitId,
        owner: &UserId,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<HabitRow> = habits::table
            .filter(habits::id.eq(id.as_uuid()))
            .filter(habits::user_id.eq(owner.as_str()))
            .select(HabitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_habit).transpose()
    }

    async fn list_active(&self, owner: &UserId) -> Result<Vec<Habit>, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HabitRow> = habits::table
            .filter(habits::user_id.eq(owner.as_str()))
            .filter(habits::is_active.eq(true))
            .order(habits::created_at.desc())
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_habit).collect()
    }

    async fn update(
        &self,
        id: &HabitId,
        owner: &UserId,
        changes: &HabitChanges,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        if changes.is_empty() {
            return self.find_owned(id, owner).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = HabitChangesRow {
            name: changes.name.as_deref(),
            description: changes
                .description
                .as_ref()
                .map(|description| description.as_deref()),
            category_id: changes.category_id.map(|category_id| *category_id.as_uuid()),
            color: changes.color.as_deref(),
            is_active: changes.is_active,
        };

        let row: Option<HabitRow> = diesel::update(
            habits::table
                .filter(habits::id.eq(id.as_uuid()))
                .filter(habits::user_id.eq(owner.as_str())),
        )
        .set(&changeset)
        .returning(HabitRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_habit).transpose()
    }

    async fn delete(&self, id: &HabitId, owner: &UserId) -> Result<bool, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Logs cascade away via the foreign key.
        let deleted = diesel::delete(
            habits::table
                .filter(habits::id.eq(id.as_uuid()))
                .filter(habits::user_id.eq(owner.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(repo_err, HabitPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn row_to_habit_converts_identifiers() {
        let habit_id = Uuid::new_v4();
        let category_id = Uuid::new_v4();
        let habit = row_to_habit(HabitRow {
            id: habit_id,
            user_id: "auth0|12345".to_owned(),
            name: "Read".to_owned(),
            description: Some("Ten pages".to_owned()),
            category_id,
            color: "#3B82F6".to_owned(),
            is_active: true,
            created_at: Utc::now(),
        })
        .expect("valid habit row");

        assert_eq!(habit.id, HabitId::from_uuid(habit_id));
        assert_eq!(habit.category_id, CategoryId::from_uuid(category_id));
        assert_eq!(habit.user_id.as_str(), "auth0|12345");
    }

    #[rstest]
    fn row_to_habit_rejects_blank_owner() {
        let result = row_to_habit(HabitRow {
            id: Uuid::new_v4(),
            user_id: String::new(),
            name: "Read".to_owned(),
            description: None,
            category_id: Uuid::new_v4(),
            color: "#3B82F6".to_owned(),
            is_active: true,
            created_at: Utc::now(),
        });

        assert!(result.is_err());
    }
}
