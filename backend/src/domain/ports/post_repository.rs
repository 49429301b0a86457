//! Port abstraction for post persistence adapters.

use async_trait::async_trait;

use crate::domain::feed::PostEntry;
use crate::domain::group::GroupId;
use crate::domain::post::{Post, PostChanges, PostId};
use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Which slice of the post table a feed reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFilter {
    /// Every post (global feed).
    All,
    /// Posts belonging to one group.
    Group(GroupId),
    /// Posts by one author.
    Author(UserId),
    /// Posts by any of the given authors (follow feed). An empty set matches
    /// nothing.
    AuthorsAmong(Vec<UserId>),
}

/// Storage for posts.
///
/// Reads return [`PostEntry`] rows pre-joined with author and group columns
/// so feed assembly never does per-entry lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError>;

    /// Apply an edit to an existing post, leaving `author` and `created_at`
    /// untouched. Returns `false` when no post has the identifier.
    async fn apply_changes(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<bool, PostPersistenceError>;

    /// Fetch one post pre-joined for display.
    async fn find_entry(&self, id: &PostId) -> Result<Option<PostEntry>, PostPersistenceError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &FeedFilter) -> Result<usize, PostPersistenceError>;

    /// Posts matching `filter`, newest first, cut to `offset`/`limit`.
    async fn list_page(
        &self,
        filter: &FeedFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PostEntry>, PostPersistenceError>;
}
