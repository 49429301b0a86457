//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{User, UserId, Username};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the user owning `username`, registering a record atomically if
    /// none exists yet. Concurrent calls for the same username must converge
    /// on a single record (unique index, conflict-ignoring insert).
    async fn resolve_or_register(&self, username: &Username)
    -> Result<User, UserPersistenceError>;

    /// Fetch a user by handle.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
