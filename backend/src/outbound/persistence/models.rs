//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, habit_logs, habits, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub name: Option<&'a str>,
}

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Insertable struct for seeding default categories.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub icon: &'a str,
    pub color: &'a str,
}

/// Row struct for reading from the habits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new habit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habits)]
pub(crate) struct NewHabitRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category_id: Uuid,
    pub color: &'a str,
}

/// Changeset struct for partial habit updates.
///
/// `None` fields are skipped; the double option on `description` lets
/// callers set the column to NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = habits)]
pub(crate) struct HabitChangesRow<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub category_id: Option<Uuid>,
    pub color: Option<&'a str>,
    pub is_active: Option<bool>,
}

/// Row struct for reading from the habit_logs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habit_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitLogRow {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub completed_on: NaiveDate,
    pub notes: Option<String>,
}

/// Insertable struct for creating new completion logs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habit_logs)]
pub(crate) struct NewHabitLogRow<'a> {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub completed_on: NaiveDate,
    pub notes: Option<&'a str>,
}
