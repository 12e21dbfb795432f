//! Habit categories.
//!
//! Categories are seeded with six fixed defaults at startup and read-only
//! afterwards; habits reference them for grouping and default colours.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(Uuid);

impl CategoryId {
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

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A habit category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier.
    pub id: CategoryId,
    /// Unique category name.
    pub name: String,
    /// Display icon (emoji).
    pub icon: String,
    /// Display colour (hex, `#RRGGBB`).
    pub color: String,
}

/// Seed definition for a default category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySeed {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// The six default categories seeded at startup.
pub const DEFAULT_CATEGORIES: [CategorySeed; 6] = [
    CategorySeed {
        name: "Health",
        icon: "\u{1F4AA}",
        color: "#10B981",
    },
    CategorySeed {
        name: "Learning",
        icon: "\u{1F4DA}",
        color: "#3B82F6",
    },
    CategorySeed {
        name: "Productivity",
        icon: "\u{26A1}",
        color: "#F59E0B",
    },
    CategorySeed {
        name: "Mindfulness",
        icon: "\u{1F9D8}",
        color: "#8B5CF6",
    },
    CategorySeed {
        name: "Social",
        icon: "\u{1F465}",
        color: "#EF4444",
    },
    CategorySeed {
        name: "Creative",
        icon: "\u{1F3A8}",
        color: "#EC4899",
    },
];
