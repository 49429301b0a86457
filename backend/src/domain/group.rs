//! Post group (topic) types.
//!
//! Groups are created by administrators out-of-band and are immutable once
//! posts reference them; no delete path exists in normal operation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::slug::is_valid_slug;

/// Validation errors returned by [`GroupSlug::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    /// Slug is empty, untrimmed, or contains a disallowed character.
    #[error("group slug must be lowercase letters, digits, or hyphens")]
    InvalidSlug,
    /// Title is empty after trimming.
    #[error("group title must not be empty")]
    EmptyTitle,
}

/// Stable group identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
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
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique URL-safe group identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct GroupSlug(String);

impl GroupSlug {
    /// Validate and construct a [`GroupSlug`].
    pub fn new(value: impl Into<String>) -> Result<Self, GroupValidationError> {
        let value = value.into();
        if !is_valid_slug(&value) {
            return Err(GroupValidationError::InvalidSlug);
        }
        Ok(Self(value))
    }

    /// Borrow the underlying slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for GroupSlug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GroupSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GroupSlug> for String {
    fn from(value: GroupSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for GroupSlug {
    type Error = GroupValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A topic grouping related posts.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Group {
    /// Stable identifier.
    pub id: GroupId,
    /// Display title.
    pub title: String,
    /// Unique URL-safe identifier.
    pub slug: GroupSlug,
    /// Free-form description shown on the group page.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Construct a new group with a fresh identifier.
    pub fn create(
        title: impl Into<String>,
        slug: GroupSlug,
        description: impl Into<String>,
    ) -> Result<Self, GroupValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GroupValidationError::EmptyTitle);
        }
        Ok(Self {
            id: GroupId::random(),
            title,
            slug,
            description: description.into(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(raw: &str) -> GroupSlug {
        GroupSlug::new(raw).expect("valid slug")
    }

    #[test]
    fn create_rejects_blank_titles() {
        assert_eq!(
            Group::create("  ", slug("rust"), "systems talk"),
            Err(GroupValidationError::EmptyTitle)
        );
    }

    #[test]
    fn slug_rejects_uppercase() {
        assert_eq!(GroupSlug::new("Rust"), Err(GroupValidationError::InvalidSlug));
    }

    #[test]
    fn slug_serializes_transparently() {
        let value = serde_json::to_value(slug("rust-cafe")).expect("serializable");
        assert_eq!(value, "rust-cafe");
    }
}
