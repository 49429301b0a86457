//! User identity types.
//!
//! Authentication itself is delegated to the login port; the domain only
//! models the stable identifier and the unique username posts and follow
//! edges reference.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 150;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username carries leading or trailing whitespace.
    #[error("username must not contain surrounding whitespace")]
    UntrimmedUsername,
    /// Username exceeds [`USERNAME_MAX`] characters.
    #[error("username must be at most {USERNAME_MAX} characters")]
    UsernameTooLong,
    /// Username contains a character outside letters, digits, `_`, `.`, `-`.
    #[error("username may only contain letters, digits, underscores, dots, or hyphens")]
    UsernameInvalidCharacters,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. read back from storage).
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse from the canonical hyphenated string form.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique, URL-safe author handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if value.trim() != value {
            return Err(UserValidationError::UntrimmedUsername);
        }
        if value.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong);
        }
        let allowed =
            |ch: char| ch.is_alphanumeric() || ch == '_' || ch == '.' || ch == '-';
        if !value.chars().all(allowed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Borrow the underlying handle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered author.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Unique handle shown next to posts and used in profile URLs.
    pub username: Username,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Construct a new user record with a fresh identifier.
    #[must_use]
    pub fn register(username: Username) -> Self {
        Self {
            id: UserId::random(),
            username,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada")]
    #[case("ada_lovelace")]
    #[case("ada.l-2")]
    fn valid_usernames_are_accepted(#[case] raw: &str) {
        assert!(Username::new(raw).is_ok());
    }

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case(" ada", UserValidationError::UntrimmedUsername)]
    #[case("ada lovelace", UserValidationError::UsernameInvalidCharacters)]
    #[case("ada!", UserValidationError::UsernameInvalidCharacters)]
    fn invalid_usernames_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw), Err(expected));
    }

    #[test]
    fn overlong_usernames_are_rejected() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(Username::new(raw), Err(UserValidationError::UsernameTooLong));
    }

    #[test]
    fn user_id_parses_its_display_form() {
        let id = UserId::random();
        assert_eq!(UserId::parse(&id.to_string()), Ok(id));
    }
}
