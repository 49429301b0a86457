//! Driving port for the follow/unfollow write path.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{UserId, Username};

/// Follow-edge operations consumed by the HTTP adapter.
///
/// Both operations are idempotent by contract: redundant calls are no-ops,
/// never errors. Self-follow requests are also silently ignored. The only
/// error surfaced for well-formed input is `NotFound` for an unknown target
/// username.
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Ensure `user` follows `author`. No-op for self-follows and existing
    /// edges.
    async fn follow(&self, user: &UserId, author: &Username) -> Result<(), Error>;

    /// Ensure `user` does not follow `author`. No-op when no edge exists.
    async fn unfollow(&self, user: &UserId, author: &Username) -> Result<(), Error>;
}
