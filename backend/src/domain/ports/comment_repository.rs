//! Port abstraction for comment persistence adapters.

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::feed::CommentEntry;
use crate::domain::post::PostId;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

/// Storage for comments. Comments are append-only through this surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment.
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    /// Every comment on a post, oldest first, pre-joined with author columns.
    async fn list_for_post(
        &self,
        post: &PostId,
    ) -> Result<Vec<CommentEntry>, CommentPersistenceError>;
}
