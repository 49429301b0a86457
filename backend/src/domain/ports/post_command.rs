//! Driving port for the post and comment write paths.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::feed::PostEntry;
use crate::domain::forms::{CommentForm, PostForm};
use crate::domain::post::PostId;
use crate::domain::user::UserId;

/// Result of asking to edit a post.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAccess {
    /// The requester owns the post; the current entry is returned so the
    /// form can be pre-filled.
    Granted(PostEntry),
    /// Someone else owns the post. Callers redirect silently, surfacing no
    /// error.
    NotOwner,
}

/// Result of submitting an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Changes were applied.
    Updated,
    /// Someone else owns the post; nothing was modified.
    NotOwner,
}

/// Post and comment write operations consumed by the HTTP adapter.
///
/// Every operation takes the acting user from the session identity; client
/// payloads never name an author.
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Validate and persist a new post owned by `author`. Returns the stored
    /// entry (the caller redirects to the author's profile). Validation
    /// failures surface as `InvalidRequest` with field details and persist
    /// nothing.
    async fn create_post(&self, author: &UserId, form: PostForm) -> Result<PostEntry, Error>;

    /// Load a post for editing, enforcing ownership. `NotFound` when the
    /// post does not exist.
    async fn load_for_edit(
        &self,
        requester: &UserId,
        id: &PostId,
    ) -> Result<EditAccess, Error>;

    /// Validate and apply an edit. Only the owner's changes are applied;
    /// everyone else gets [`EditOutcome::NotOwner`] with the record
    /// untouched. `author` and `created_at` never change.
    async fn edit_post(
        &self,
        requester: &UserId,
        id: &PostId,
        form: PostForm,
    ) -> Result<EditOutcome, Error>;

    /// Validate and persist a comment on `post` authored by `author`.
    /// `NotFound` when the post does not exist.
    async fn add_comment(
        &self,
        author: &UserId,
        post: &PostId,
        form: CommentForm,
    ) -> Result<(), Error>;
}
