//! User identity types.
//!
//! Authentication is delegated to an external identity provider; the backend
//! only stores the provider's subject identifier alongside contact details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque user identifier issued by the external identity provider.
///
/// ## Invariants
/// - Non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Error raised when constructing a [`UserId`] from a blank string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdValidationError;

impl std::fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user identifier must not be empty")
    }
}

impl std::error::Error for UserIdValidationError {}

impl UserId {
    /// Validate and wrap an identity-provider subject identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserIdValidationError);
        }
        Ok(Self(value))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Application user record.
///
/// Upserted on first sign-in; never deleted by the core logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identity-provider subject identifier.
    pub id: UserId,
    /// Contact email address.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input payload for the user upsert operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("auth0|12345")]
    #[case("user_2f0c")]
    fn user_id_accepts_provider_subjects(#[case] raw: &str) {
        let id = UserId::new(raw).expect("valid id");
        assert_eq!(id.as_str(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn user_id_rejects_blank_values(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(UserIdValidationError));
    }

    #[rstest]
    fn user_id_deserialises_from_json_string() {
        let id: UserId = serde_json::from_str("\"auth0|12345\"").expect("deserialise");
        assert_eq!(id.as_str(), "auth0|12345");
        assert!(serde_json::from_str::<UserId>("\"  \"").is_err());
    }
}
