//! User use-case service.
//!
//! Sign-in is handled by the external identity provider; the backend only
//! upserts the resulting profile so habits have an owner row to reference.

use std::sync::Arc;

use tracing::{debug, error};

use super::error::Error;
use super::ports::{UserPersistenceError, UserRepository};
use super::user::{NewUser, User};

/// User use-case service backing the HTTP adapter.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

fn map_user_error(error: UserPersistenceError) -> Error {
    error!(%error, "user repository failure");
    Error::internal(error.to_string())
}

impl UserService {
    /// Assemble the service from its driven port.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create or refresh the profile row for an identity-provider subject.
    pub async fn upsert_user(&self, user: NewUser) -> Result<User, Error> {
        let stored = self.users.upsert(&user).await.map_err(map_user_error)?;
        debug!(user_id = %stored.id, "upserted user");
        Ok(stored)
    }
}
