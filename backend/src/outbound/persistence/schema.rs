//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; regenerate with `diesel print-schema` when migrations change.

diesel::table! {
    /// User accounts, keyed by the external identity provider's subject id.
    users (id) {
        /// Identity-provider subject identifier.
        id -> Text,
        /// Contact email address.
        email -> Text,
        /// Optional display name.
        name -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Habit categories; seeded at startup, read-only afterwards.
    categories (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique category name.
        name -> Text,
        /// Display icon (emoji).
        icon -> Text,
        /// Display colour (hex).
        color -> Text,
    }
}

diesel::table! {
    /// User-defined habits.
    habits (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user; cascades on user deletion.
        user_id -> Text,
        /// Habit name.
        name -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Category reference.
        category_id -> Uuid,
        /// Display colour (hex).
        color -> Text,
        /// Inactive habits are hidden from the list view.
        is_active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-day completion logs; unique per (habit, day).
    habit_logs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Habit reference; cascades on habit deletion.
        habit_id -> Uuid,
        /// UTC calendar day the habit was completed on.
        completed_on -> Date,
        /// Optional free-text notes.
        notes -> Nullable<Text>,
    }
}

diesel::joinable!(habits -> users (user_id));
diesel::joinable!(habits -> categories (category_id));
diesel::joinable!(habit_logs -> habits (habit_id));

diesel::allow_tables_to_appear_in_same_query!(users, categories, habits, habit_logs);
