//! Port abstraction for follow-edge persistence adapters.

use async_trait::async_trait;

use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by follow repository adapters.
    pub enum FollowPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "follow repository query failed: {message}",
    }
}

/// Storage for directed follow edges `(user, author)`.
///
/// Edge uniqueness under concurrent creation is the adapter's contract: a
/// unique index plus a conflict-ignoring insert, never check-then-act in the
/// caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Create the edge if it does not exist; succeeds silently when it does.
    async fn create(&self, user: &UserId, author: &UserId) -> Result<(), FollowPersistenceError>;

    /// Delete the edge if present; succeeds silently when absent.
    async fn delete(&self, user: &UserId, author: &UserId) -> Result<(), FollowPersistenceError>;

    /// Whether `user` follows `author`.
    async fn exists(&self, user: &UserId, author: &UserId)
    -> Result<bool, FollowPersistenceError>;

    /// Every author `user` follows.
    async fn authors_followed_by(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, FollowPersistenceError>;
}
