//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the use-case services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::{HabitService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub habits: Arc<HabitService>,
    pub users: Arc<UserService>,
}

impl HttpState {
    /// Bundle the use-case services for handler injection.
    pub fn new(habits: HabitService, users: UserService) -> Self {
        Self {
            habits: Arc::new(habits),
            users: Arc::new(users),
        }
    }
}
