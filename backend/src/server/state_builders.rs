//! Assembly of the use-case services from configuration.
//!
//! Postgres-backed adapters are the production path; demo mode swaps in the
//! in-memory adapters so the server runs without a database. Both paths seed
//! the default categories before serving traffic.

use std::sync::Arc;

use color_eyre::eyre::{eyre, Result, WrapErr};
use mockable::DefaultClock;
use tracing::info;

use crate::domain::ports::{
    CategoryRepository, HabitLogRepository, HabitRepository, UserRepository,
};
use crate::domain::{HabitService, UserService, DEFAULT_CATEGORIES};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    MemoryCategoryRepository, MemoryHabitLogRepository, MemoryHabitRepository, MemoryStore,
    MemoryUserRepository,
};
use crate::outbound::persistence::{
    run_pending_migrations, DbPool, DieselCategoryRepository, DieselHabitLogRepository,
    DieselHabitRepository, DieselUserRepository, PoolConfig,
};
use crate::server::config::AppConfig;

struct Repositories {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    habits: Arc<dyn HabitRepository>,
    logs: Arc<dyn HabitLogRepository>,
}

fn memory_repositories() -> Repositories {
    let store = MemoryStore::new();
    Repositories {
        users: Arc::new(MemoryUserRepository::new(store.clone())),
        categories: Arc::new(MemoryCategoryRepository::new(store.clone())),
        habits: Arc::new(MemoryHabitRepository::new(store.clone())),
        logs: Arc::new(MemoryHabitLogRepository::new(store)),
    }
}

async fn postgres_repositories(config: &AppConfig) -> Result<Repositories> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("HABITAT_DATABASE_URL is required unless demo mode is enabled"))?;

    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply pending migrations")?;

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(config.db_pool_size()))
        .await
        .wrap_err("failed to build database pool")?;

    Ok(Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        habits: Arc::new(DieselHabitRepository::new(pool.clone())),
        logs: Arc::new(DieselHabitLogRepository::new(pool)),
    })
}

/// Build the HTTP handler state, seeding the default categories.
pub(crate) async fn build_http_state(config: &AppConfig) -> Result<HttpState> {
    let repositories = if config.demo_mode {
        info!("demo mode enabled; serving from in-memory storage");
        memory_repositories()
    } else {
        postgres_repositories(config).await?
    };

    repositories
        .categories
        .seed_defaults(&DEFAULT_CATEGORIES)
        .await
        .wrap_err("failed to seed default categories")?;

    let habit_service = HabitService::new(
        repositories.users.clone(),
        repositories.categories,
        repositories.habits,
        repositories.logs,
        Arc::new(DefaultClock),
    );
    let user_service = UserService::new(repositories.users);

    Ok(HttpState::new(habit_service, user_service))
}
