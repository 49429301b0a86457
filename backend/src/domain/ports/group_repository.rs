//! Port abstraction for group persistence adapters.

use async_trait::async_trait;

use crate::domain::group::{Group, GroupId, GroupSlug};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by group repository adapters.
    pub enum GroupPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "group repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "group repository query failed: {message}",
    }
}

/// Storage for administrator-curated groups.
///
/// Groups have no update or delete operations; once created they only ever
/// get referenced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Insert a new group (seeding path only).
    async fn insert(&self, group: &Group) -> Result<(), GroupPersistenceError>;

    /// Fetch a group by its URL slug.
    async fn find_by_slug(&self, slug: &GroupSlug)
    -> Result<Option<Group>, GroupPersistenceError>;

    /// Fetch a group by identifier.
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, GroupPersistenceError>;

    /// Every group, ordered by title, for form choice lists.
    async fn list_all(&self) -> Result<Vec<Group>, GroupPersistenceError>;
}
