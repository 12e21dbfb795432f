//! Habit aggregate and its change sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryId;
use super::user::UserId;

/// Habit identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(Uuid);

impl HabitId {
    /// Wrap an existing UUID.
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-defined recurring action tracked daily.
///
/// Owned exclusively by its user; deleting a habit cascades deletion of all
/// of its completion logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Stable identifier.
    pub id: HabitId,
    /// Owning user.
    pub user_id: UserId,
    /// Habit name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Category reference.
    pub category_id: CategoryId,
    /// Display colour (hex); defaults to the category colour on creation.
    pub color: String,
    /// Inactive habits are hidden from the list view.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input payload for habit creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    /// When absent the service substitutes the category's colour.
    pub color: Option<String>,
}

/// Partial update applied to an existing habit.
///
/// `None` fields are left unchanged. `description` uses a nested option so
/// callers can distinguish "leave as is" from "clear".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category_id: Option<CategoryId>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl HabitChanges {
    /// True when the update would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.color.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_changes_report_empty() {
        assert!(HabitChanges::default().is_empty());
    }

    #[rstest]
    fn clearing_description_is_a_change() {
        let changes = HabitChanges {
            description: Some(None),
            ..HabitChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
