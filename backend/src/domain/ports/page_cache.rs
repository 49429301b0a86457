//! Port for the rendered-page cache in front of the global feed.
//!
//! The cache stores fully rendered response bodies, not query results, under
//! a shared prefix. Reads within the TTL window are eventually consistent
//! with writes; that staleness is a documented invariant of the global feed,
//! not a defect. `purge` drops every entry under a prefix at once.

use std::time::Duration;

use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by page cache adapters.
    pub enum PageCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "page cache backend failure: {message}",
    }
}

/// Time-bounded storage for rendered response bodies.
///
/// Keys are namespaced by `prefix`; the per-entry `key` distinguishes pages
/// within the prefix. Cache failures must never take a read path down, so
/// callers treat errors as misses and log them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Fetch a cached body, `None` on miss or expiry.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<String>, PageCacheError>;

    /// Store a rendered body for `ttl`.
    async fn put(
        &self,
        prefix: &str,
        key: &str,
        body: &str,
        ttl: Duration,
    ) -> Result<(), PageCacheError>;

    /// Drop every entry stored under `prefix`.
    async fn purge(&self, prefix: &str) -> Result<(), PageCacheError>;
}
