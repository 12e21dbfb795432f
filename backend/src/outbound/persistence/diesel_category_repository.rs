//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryId, CategorySeed};

use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CategoryPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CategoryPersistenceError::connection("database connection error")
        }
        _ => CategoryPersistenceError::query("database error"),
    }
}

fn row_to_category(row: CategoryRow) -> Category {
    Category {
        id: CategoryId::from_uuid(row.id),
        name: row.name,
        icon: row.icon,
        color: row.color,
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_category).collect())
    }

    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .filter(categories::id.eq(id.as_uuid()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_category))
    }

    async fn seed_defaults(
        &self,
        defaults: &[CategorySeed],
    ) -> Result<(), CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NewCategoryRow<'_>> = defaults
            .iter()
            .map(|seed| NewCategoryRow {
                id: Uuid::new_v4(),
                name: seed.name,
                icon: seed.icon,
                color: seed.color,
            })
            .collect();

        // Names are unique; existing rows keep their identifiers.
        diesel::insert_into(categories::table)
            .values(&rows)
            .on_conflict(categories::name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            CategoryPersistenceError::Connection { .. }
        ));
    }

    #[rstest]
    fn row_to_category_copies_fields() {
        let id = Uuid::new_v4();
        let category = row_to_category(CategoryRow {
            id,
            name: "Health".to_owned(),
            icon: "\u{1F4AA}".to_owned(),
            color: "#10B981".to_owned(),
        });

        assert_eq!(category.id, CategoryId::from_uuid(id));
        assert_eq!(category.name, "Health");
    }
}
