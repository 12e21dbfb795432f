//! Port abstraction for category persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::category::{Category, CategoryId, CategorySeed};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List every category, ordered by name.
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError>;

    /// Fetch a category by identifier.
    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryPersistenceError>;

    /// Insert the default categories, skipping names that already exist.
    async fn seed_defaults(
        &self,
        defaults: &[CategorySeed],
    ) -> Result<(), CategoryPersistenceError>;
}
