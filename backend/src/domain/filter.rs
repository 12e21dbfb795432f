//! List-view filtering over habits with derived stats.
//!
//! Filters are independent and conjunctive: a habit survives only when every
//! populated refinement matches. Nothing here is persisted; the list
//! endpoint re-applies the filter on every request.

use serde::{Deserialize, Serialize};

use super::category::CategoryId;
use super::habit::Habit;
use super::stats::HabitStats;

/// Completion-rate buckets used by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBucket {
    /// Rate of 80% or higher.
    High,
    /// Rate between 60% and 79%.
    Medium,
    /// Rate below 60%.
    Low,
}

impl RateBucket {
    /// Classify an integer completion rate.
    pub fn of(rate: u8) -> Self {
        match rate {
            80.. => Self::High,
            60..=79 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Stable string form used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Error raised when parsing an unknown rate bucket string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRateBucketError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseRateBucketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown rate bucket: {}", self.input)
    }
}

impl std::error::Error for ParseRateBucketError {}

impl std::str::FromStr for RateBucket {
    type Err = ParseRateBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseRateBucketError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Streak buckets used by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakBucket {
    /// Streak of 7 days or more.
    Strong,
    /// Streak between 3 and 6 days.
    Building,
    /// Streak of 1 or 2 days.
    Started,
    /// No current streak.
    None,
}

impl StreakBucket {
    /// Classify a streak length.
    pub fn of(streak: u32) -> Self {
        match streak {
            7.. => Self::Strong,
            3..=6 => Self::Building,
            1..=2 => Self::Started,
            0 => Self::None,
        }
    }

    /// Stable string form used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Building => "building",
            Self::Started => "started",
            Self::None => "none",
        }
    }
}

/// Error raised when parsing an unknown streak bucket string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStreakBucketError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseStreakBucketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown streak bucket: {}", self.input)
    }
}

impl std::error::Error for ParseStreakBucketError {}

impl std::str::FromStr for StreakBucket {
    type Err = ParseStreakBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strong" => Ok(Self::Strong),
            "building" => Ok(Self::Building),
            "started" => Ok(Self::Started),
            "none" => Ok(Self::None),
            _ => Err(ParseStreakBucketError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Conjunctive refinements over the habit list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HabitFilter {
    /// Case-insensitive substring match against name or description.
    pub search: Option<String>,
    /// Exact category match.
    pub category_id: Option<CategoryId>,
    /// Completion-rate bucket.
    pub rate: Option<RateBucket>,
    /// Streak bucket.
    pub streak: Option<StreakBucket>,
}

impl HabitFilter {
    /// True when no refinement is populated.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category_id.is_none()
            && self.rate.is_none()
            && self.streak.is_none()
    }

    /// Whether a habit with its derived stats survives every refinement.
    pub fn matches(&self, habit: &Habit, stats: &HabitStats) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let name_hit = habit.name.to_lowercase().contains(&needle);
            let description_hit = habit
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle));
            if !name_hit && !description_hit {
                return false;
            }
        }
        if let Some(category_id) = &self.category_id {
            if habit.category_id != *category_id {
                return false;
            }
        }
        if let Some(rate) = &self.rate {
            if RateBucket::of(stats.completion_rate) != *rate {
                return false;
            }
        }
        if let Some(streak) = &self.streak {
            if StreakBucket::of(stats.current_streak) != *streak {
                return false;
            }
        }
        true
    }
}
