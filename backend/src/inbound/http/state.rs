//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{FeedQuery, FollowCommand, LoginService, PageCache, PostCommand};

/// Cache policy applied to the global feed page.
#[derive(Debug, Clone)]
pub struct FeedCachePolicy {
    /// Shared key prefix for every cached feed page.
    pub prefix: String,
    /// How long a rendered page stays served after a write.
    pub ttl: Duration,
}

impl Default for FeedCachePolicy {
    fn default() -> Self {
        Self {
            prefix: "index_page".to_owned(),
            ttl: Duration::from_secs(20),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Session establishment.
    pub login: Arc<dyn LoginService>,
    /// Read-path assembler.
    pub feeds: Arc<dyn FeedQuery>,
    /// Post and comment write path.
    pub posts: Arc<dyn PostCommand>,
    /// Follow-edge write path.
    pub follows: Arc<dyn FollowCommand>,
    /// Rendered-page cache in front of the global feed.
    pub page_cache: Arc<dyn PageCache>,
    /// TTL and key prefix for the global feed cache.
    pub cache_policy: FeedCachePolicy,
}
