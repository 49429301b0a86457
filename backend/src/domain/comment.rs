//! Comment records attached to posts.
//!
//! Comments are created only by authenticated users and are immutable
//! afterwards; no edit or delete surface exists.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::post::PostId;
use super::user::UserId;

/// Validation errors returned by [`CommentText::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentValidationError {
    /// Text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyText,
}

/// Stable comment identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
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

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment body text, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Validate and construct comment body text.
    pub fn new(value: impl Into<String>) -> Result<Self, CommentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        Ok(Self(value))
    }

    /// Borrow the underlying text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

impl TryFrom<String> for CommentText {
    type Error = CommentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored comment record.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Stable identifier.
    pub id: CommentId,
    /// Post the comment belongs to.
    pub post: PostId,
    /// Commenting user; always taken from the session identity.
    pub author: UserId,
    /// Body text.
    pub text: CommentText,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on `post` authored by `author`.
    #[must_use]
    pub fn create(post: PostId, author: UserId, text: CommentText) -> Self {
        Self {
            id: CommentId::random(),
            post,
            author,
            text,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(CommentText::new(" \t"), Err(CommentValidationError::EmptyText));
    }

    #[test]
    fn create_binds_post_and_author() {
        let post = PostId::random();
        let author = UserId::random();
        let comment = Comment::create(post, author, CommentText::new("nice").expect("text"));
        assert_eq!(comment.post, post);
        assert_eq!(comment.author, author);
    }
}
