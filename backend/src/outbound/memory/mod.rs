//! In-memory repository adapters.
//!
//! Back the demo mode (no PostgreSQL required) and the integration tests.
//! One [`MemoryStore`] is shared by all four adapters so habit deletion can
//! cascade to logs the same way the database foreign key does. The same
//! invariants hold as in PostgreSQL: ownership-scoped reads and at most one
//! log per (habit, day).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::domain::ports::{
    CategoryPersistenceError, CategoryRepository, HabitLogPersistenceError, HabitLogRepository,
    HabitPersistenceError, HabitRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Category, CategoryId, CategorySeed, Habit, HabitChanges, HabitId, HabitLog, HabitLogId,
    LogQuery, NewHabit, NewHabitLog, NewUser, User, UserId,
};

#[derive(Debug, Default)]
struct StoreInner {
    users: HashMap<UserId, User>,
    categories: Vec<Category>,
    habits: Vec<Habit>,
    logs: Vec<HabitLog>,
}

/// Shared in-memory state behind the memory adapters.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

const POISONED: &str = "memory store mutex poisoned";

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, String> {
        self.inner.lock().map_err(|_| POISONED.to_owned())
    }
}

/// In-memory implementation of the `UserRepository` port.
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn upsert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut inner = self.store.lock().map_err(UserPersistenceError::query)?;
        let now = Utc::now();
        let stored = inner
            .users
            .entry(user.id.clone())
            .and_modify(|existing| {
                existing.email = user.email.clone();
                existing.name = user.name.clone();
                existing.updated_at = now;
            })
            .or_insert_with(|| User {
                id: user.id.clone(),
                email: user.email.clone(),
                name: user.name.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let inner = self.store.lock().map_err(UserPersistenceError::query)?;
        Ok(inner.users.get(id).cloned())
    }
}

/// In-memory implementation of the `CategoryRepository` port.
#[derive(Debug, Clone)]
pub struct MemoryCategoryRepository {
    store: MemoryStore,
}

impl MemoryCategoryRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        let inner = self.store.lock().map_err(CategoryPersistenceError::query)?;
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let inner = self.store.lock().map_err(CategoryPersistenceError::query)?;
        Ok(inner
            .categories
            .iter()
            .find(|category| category.id == *id)
            .cloned())
    }

    async fn seed_defaults(
        &self,
        defaults: &[CategorySeed],
    ) -> Result<(), CategoryPersistenceError> {
        let mut inner = self.store.lock().map_err(CategoryPersistenceError::query)?;
        for seed in defaults {
            if inner.categories.iter().any(|c| c.name == seed.name) {
                continue;
            }
            inner.categories.push(Category {
                id: CategoryId::random(),
                name: seed.name.to_owned(),
                icon: seed.icon.to_owned(),
                color: seed.color.to_owned(),
            });
        }
        Ok(())
    }
}

/// In-memory implementation of the `HabitRepository` port.
#[derive(Debug, Clone)]
pub struct MemoryHabitRepository {
    store: MemoryStore,
}

impl MemoryHabitRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn apply_changes(habit: &mut Habit, changes: &HabitChanges) {
    if let Some(name) = &changes.name {
        habit.name = name.clone();
    }
    if let Some(description) = &changes.description {
        habit.description = description.clone();
    }
    if let Some(category_id) = changes.category_id {
        habit.category_id = category_id;
    }
    if let Some(color) = &changes.color {
        habit.color = color.clone();
    }
    if let Some(is_active) = changes.is_active {
        habit.is_active = is_active;
    }
}

#[async_trait]
impl HabitRepository for MemoryHabitRepository {
    async fn insert(&self, habit: &NewHabit) -> Result<Habit, HabitPersistenceError> {
        let mut inner = self.store.lock().map_err(HabitPersistenceError::query)?;
        let color = habit
            .color
            .clone()
            .ok_or_else(|| HabitPersistenceError::query("habit colour must be resolved"))?;
        let stored = Habit {
            id: HabitId::random(),
            user_id: habit.user_id.clone(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            category_id: habit.category_id,
            color,
            is_active: true,
            created_at: Utc::now(),
        };
        inner.habits.push(stored.clone());
        Ok(stored)
    }

    async fn find_owned(
        &self,
        id: &HabitId,
        owner: &UserId,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        let inner = self.store.lock().map_err(HabitPersistenceError::query)?;
        Ok(inner
            .habits
            .iter()
            .find(|habit| habit.id == *id && habit.user_id == *owner)
            .cloned())
    }

    async fn list_active(&self, owner: &UserId) -> Result<Vec<Habit>, HabitPersistenceError> {
        let inner = self.store.lock().map_err(HabitPersistenceError::query)?;
        let mut habits: Vec<Habit> = inner
            .habits
            .iter()
            .filter(|habit| habit.user_id == *owner && habit.is_active)
            .cloned()
            .collect();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(habits)
    }

    async fn update(
        &self,
        id: &HabitId,
        owner: &UserId,
        changes: &HabitChanges,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        let mut inner = self.store.lock().map_err(HabitPersistenceError::query)?;
        let habit = inner
            .habits
            .iter_mut()
            .find(|habit| habit.id == *id && habit.user_id == *owner);
        Ok(habit.map(|habit| {
            apply_changes(habit, changes);
            habit.clone()
        }))
    }

    async fn delete(&self, id: &HabitId, owner: &UserId) -> Result<bool, HabitPersistenceError> {
        let mut inner = self.store.lock().map_err(HabitPersistenceError::query)?;
        let before = inner.habits.len();
        inner
            .habits
            .retain(|habit| !(habit.id == *id && habit.user_id == *owner));
        let deleted = inner.habits.len() < before;
        if deleted {
            // Mirror the database cascade.
            inner.logs.retain(|log| log.habit_id != *id);
        }
        Ok(deleted)
    }
}

/// In-memory implementation of the `HabitLogRepository` port.
#[derive(Debug, Clone)]
pub struct MemoryHabitLogRepository {
    store: MemoryStore,
}

impl MemoryHabitLogRepository {
    /// Create an adapter over the shared store.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HabitLogRepository for MemoryHabitLogRepository {
    async fn insert(&self, log: &NewHabitLog) -> Result<HabitLog, HabitLogPersistenceError> {
        let mut inner = self.store.lock().map_err(HabitLogPersistenceError::query)?;
        let duplicate = inner
            .logs
            .iter()
            .any(|existing| existing.habit_id == log.habit_id && existing.completed_on == log.completed_on);
        if duplicate {
            return Err(HabitLogPersistenceError::duplicate_day(log.completed_on));
        }
        let stored = HabitLog {
            id: HabitLogId::random(),
            habit_id: log.habit_id,
            completed_on: log.completed_on,
            notes: log.notes.clone(),
        };
        inner.logs.push(stored.clone());
        Ok(stored)
    }

    async fn delete_by_day(
        &self,
        habit_id: &HabitId,
        day: NaiveDate,
    ) -> Result<bool, HabitLogPersistenceError> {
        let mut inner = self.store.lock().map_err(HabitLogPersistenceError::query)?;
        let before = inner.logs.len();
        inner
            .logs
            .retain(|log| !(log.habit_id == *habit_id && log.completed_on == day));
        Ok(inner.logs.len() < before)
    }

    async fn list(
        &self,
        habit_id: &HabitId,
        query: LogQuery,
    ) -> Result<Vec<HabitLog>, HabitLogPersistenceError> {
        let inner = self.store.lock().map_err(HabitLogPersistenceError::query)?;
        let mut logs: Vec<HabitLog> = inner
            .logs
            .iter()
            .filter(|log| log.habit_id == *habit_id)
            .filter(|log| query.start.is_none_or(|start| log.completed_on >= start))
            .filter(|log| query.end.is_none_or(|end| log.completed_on <= end))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.completed_on.cmp(&a.completed_on));
        if let Some(limit) = query.limit {
            logs.truncate(limit as usize);
        }
        Ok(logs)
    }
}
