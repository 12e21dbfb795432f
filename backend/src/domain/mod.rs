//! Domain entities, derived statistics, and use-case services.
//!
//! Everything in this module is transport agnostic. Inbound adapters call
//! the services; outbound adapters implement the [`ports`] traits.

pub mod category;
pub mod error;
pub mod filter;
pub mod habit;
pub mod habit_log;
pub mod habit_service;
pub mod ports;
pub mod stats;
pub mod user;
pub mod user_service;

pub use self::category::{Category, CategoryId, CategorySeed, DEFAULT_CATEGORIES};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filter::{HabitFilter, RateBucket, StreakBucket};
pub use self::habit::{Habit, HabitChanges, HabitId, NewHabit};
pub use self::habit_log::{day_of, HabitLog, HabitLogId, LogQuery, NewHabitLog};
pub use self::habit_service::{CheckInRequest, CreateHabitRequest, HabitOverview, HabitService};
pub use self::stats::{
    derive_stats, HabitStats, DEFAULT_FETCH_WINDOW_DAYS, DEFAULT_RATE_WINDOW_DAYS,
};
pub use self::user::{NewUser, User, UserId, UserIdValidationError};
pub use self::user_service::UserService;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "Trace-Id";

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
