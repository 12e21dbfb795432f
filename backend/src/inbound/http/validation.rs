//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` domain error carrying a
//! `details` object with the offending field and a stable failure code, so
//! clients can react programmatically.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{day_of, CategoryId, Error, HabitId, RateBucket, StreakBucket, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    InvalidUuid,
    InvalidDate,
    InvalidFilter,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidFilter => "invalid_filter",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be a calendar date (YYYY-MM-DD) or an RFC 3339 timestamp"),
    )
    .with_value(ErrorCode::InvalidDate, value)
}

pub(crate) fn invalid_filter_error(field: FieldName, value: &str, allowed: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be one of: {allowed}"))
        .with_value(ErrorCode::InvalidFilter, value)
}

pub(crate) fn require_field<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_user_id(value: String, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} must not be blank"))
            .with_code(ErrorCode::BlankField)
    })
}

pub(crate) fn parse_category_id(value: String, field: FieldName) -> Result<CategoryId, Error> {
    Uuid::parse_str(&value)
        .map(CategoryId::from_uuid)
        .map_err(|_| invalid_uuid_error(field, &value))
}

pub(crate) fn parse_habit_id(value: &str, field: FieldName) -> Result<HabitId, Error> {
    Uuid::parse_str(value)
        .map(HabitId::from_uuid)
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a calendar day, accepting a plain date or an RFC 3339 timestamp.
///
/// Timestamps are converted to UTC before truncation so the stored day
/// matches the stat derivation's day boundary.
pub(crate) fn parse_day(value: String, field: FieldName) -> Result<NaiveDate, Error> {
    if let Ok(date) = NaiveDate::from_str(&value) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| day_of(timestamp.with_timezone(&Utc)))
        .map_err(|_| invalid_date_error(field, &value))
}

pub(crate) fn parse_optional_day(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_day(raw, field)).transpose()
}

pub(crate) fn parse_rate_bucket(value: String, field: FieldName) -> Result<RateBucket, Error> {
    RateBucket::from_str(&value)
        .map_err(|_| invalid_filter_error(field, &value, "high, medium, low"))
}

pub(crate) fn parse_streak_bucket(value: String, field: FieldName) -> Result<StreakBucket, Error> {
    StreakBucket::from_str(&value)
        .map_err(|_| invalid_filter_error(field, &value, "strong, building, started, none"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    fn details_field(error: &Error, key: &str) -> String {
        error
            .details()
            .and_then(|details| details.get(key))
            .and_then(|value| value.as_str())
            .map(str::to_owned)
            .expect("details entry")
    }

    #[rstest]
    fn missing_field_error_names_the_field() {
        let error = missing_field_error(FieldName::new("userId"));
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(details_field(&error, "field"), "userId");
        assert_eq!(details_field(&error, "code"), "missing_field");
    }

    #[rstest]
    fn parse_day_accepts_plain_dates() {
        let day = parse_day("2024-01-05".to_owned(), FieldName::new("completedDate"))
            .expect("plain date");
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"));
    }

    #[rstest]
    #[case("2024-01-05T23:30:00Z", 2024, 1, 5)]
    // Just past midnight UTC expressed in a negative offset.
    #[case("2024-01-05T20:30:00-05:00", 2024, 1, 6)]
    fn parse_day_truncates_timestamps_in_utc(
        #[case] raw: &str,
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
    ) {
        let day = parse_day(raw.to_owned(), FieldName::new("completedDate")).expect("timestamp");
        assert_eq!(day, NaiveDate::from_ymd_opt(y, m, d).expect("date"));
    }

    #[rstest]
    #[case("yesterday")]
    #[case("05/01/2024")]
    #[case("")]
    fn parse_day_rejects_other_formats(#[case] raw: &str) {
        let error = parse_day(raw.to_owned(), FieldName::new("completedDate"))
            .expect_err("invalid date");
        assert_eq!(details_field(&error, "code"), "invalid_date");
    }

    #[rstest]
    fn parse_rate_bucket_reports_allowed_values() {
        let error =
            parse_rate_bucket("extreme".to_owned(), FieldName::new("rate")).expect_err("invalid");
        assert_eq!(details_field(&error, "code"), "invalid_filter");
        assert!(error.message().contains("high, medium, low"));
    }

    #[rstest]
    fn parse_user_id_rejects_blank_values() {
        let error =
            parse_user_id("   ".to_owned(), FieldName::new("userId")).expect_err("blank id");
        assert_eq!(details_field(&error, "code"), "blank_field");
    }

    #[rstest]
    fn parse_category_id_rejects_malformed_uuids() {
        let error = parse_category_id("not-a-uuid".to_owned(), FieldName::new("categoryId"))
            .expect_err("invalid uuid");
        assert_eq!(details_field(&error, "field"), "categoryId");
        assert_eq!(details_field(&error, "value"), "not-a-uuid");
    }
}
