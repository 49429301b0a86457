//! In-process TTL cache for rendered pages.
//!
//! Default page-cache adapter: a mutex-guarded map with per-entry expiry.
//! Good for single-instance deployments, DB-less operation, and tests; a
//! fleet shares nothing, which only widens the documented staleness window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::ports::{PageCache, PageCacheError};

const POISONED: &str = "page cache lock poisoned";

struct CacheEntry {
    body: String,
    expires_at: Instant,
}

/// Mutex-guarded in-memory page cache.
#[derive(Default)]
pub struct MemoryPageCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryPageCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn full_key(prefix: &str, key: &str) -> String {
        format!("{prefix}:{key}")
    }
}

#[async_trait]
impl PageCache for MemoryPageCache {
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<String>, PageCacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PageCacheError::backend(POISONED))?;
        let full_key = Self::full_key(prefix, key);
        match entries.get(&full_key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.body.clone())),
            Some(_) => {
                entries.remove(&full_key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        prefix: &str,
        key: &str,
        body: &str,
        ttl: Duration,
    ) -> Result<(), PageCacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PageCacheError::backend(POISONED))?;
        entries.insert(
            Self::full_key(prefix, key),
            CacheEntry {
                body: body.to_owned(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn purge(&self, prefix: &str) -> Result<(), PageCacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PageCacheError::backend(POISONED))?;
        let marker = format!("{prefix}:");
        entries.retain(|key, _| !key.starts_with(&marker));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(20);

    #[tokio::test]
    async fn entries_round_trip_within_the_ttl() {
        let cache = MemoryPageCache::new();
        cache.put("index", "page:1", "body", TTL).await.expect("put");
        assert_eq!(
            cache.get("index", "page:1").await.expect("get"),
            Some("body".to_owned())
        );
    }

    #[tokio::test]
    async fn expired_entries_read_as_misses() {
        let cache = MemoryPageCache::new();
        cache
            .put("index", "page:1", "body", Duration::ZERO)
            .await
            .expect("put");
        assert_eq!(cache.get("index", "page:1").await.expect("get"), None);
    }

    #[tokio::test]
    async fn purge_drops_only_the_given_prefix() {
        let cache = MemoryPageCache::new();
        cache.put("index", "page:1", "a", TTL).await.expect("put");
        cache.put("other", "page:1", "b", TTL).await.expect("put");

        cache.purge("index").await.expect("purge");

        assert_eq!(cache.get("index", "page:1").await.expect("get"), None);
        assert_eq!(
            cache.get("other", "page:1").await.expect("get"),
            Some("b".to_owned())
        );
    }
}
