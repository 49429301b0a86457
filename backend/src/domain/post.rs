//! Post aggregate.
//!
//! A post belongs to exactly one author, optionally to one group, and may
//! carry one image attachment. `author` and `created_at` are fixed at
//! creation; edits may only touch `text`, `group`, and `image`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::group::GroupId;
use super::image::ImagePayload;
use super::user::UserId;

/// Validation errors returned by [`PostText::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Text is empty after trimming.
    #[error("post text must not be empty")]
    EmptyText,
}

/// Stable post identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
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

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post body text, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct PostText(String);

impl PostText {
    /// Validate and construct post body text.
    pub fn new(value: impl Into<String>) -> Result<Self, PostValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PostValidationError::EmptyText);
        }
        Ok(Self(value))
    }

    /// Borrow the underlying text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PostText {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored post record.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Stable identifier.
    pub id: PostId,
    /// Owning author; always taken from the session identity, never from
    /// client input.
    pub author: UserId,
    /// Optional group membership.
    pub group: Option<GroupId>,
    /// Body text.
    pub text: PostText,
    /// Optional image attachment.
    pub image: Option<ImagePayload>,
    /// Creation timestamp; immutable across edits.
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author`.
    #[must_use]
    pub fn create(
        author: UserId,
        text: PostText,
        group: Option<GroupId>,
        image: Option<ImagePayload>,
    ) -> Self {
        Self {
            id: PostId::random(),
            author,
            group,
            text,
            image,
            created_at: Utc::now(),
        }
    }
}

/// Mutable fields applied by an edit.
///
/// `group` replaces the post's membership outright (a `None` clears it);
/// `image` replaces the attachment only when present, otherwise the stored
/// attachment is kept. `author` and `created_at` have no representation here
/// and therefore can never change.
#[derive(Debug, Clone, PartialEq)]
pub struct PostChanges {
    /// Replacement body text.
    pub text: PostText,
    /// Replacement group membership; `None` leaves the post ungrouped.
    pub group: Option<GroupId>,
    /// Replacement attachment; `None` keeps the current one.
    pub image: Option<ImagePayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(PostText::new("  \n "), Err(PostValidationError::EmptyText));
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        let text = PostText::new("  keep me  ").expect("non-empty");
        assert_eq!(text.as_str(), "  keep me  ");
    }

    #[test]
    fn create_assigns_a_fresh_identifier_per_post() {
        let author = UserId::random();
        let a = Post::create(author, PostText::new("a").expect("text"), None, None);
        let b = Post::create(author, PostText::new("b").expect("text"), None, None);
        assert_ne!(a.id, b.id);
        assert_eq!(a.author, b.author);
    }
}
