//! Redis-backed page cache over `bb8-redis`.
//!
//! Entries live under versioned keys: `{prefix}:{version}:{key}`. `purge`
//! bumps the version counter, orphaning every existing entry at once without
//! SCAN sweeps; the orphans fall out on their own TTLs.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::AsyncCommands;
use bb8_redis::RedisConnectionManager;

use crate::domain::ports::{PageCache, PageCacheError};

/// Redis-backed page cache.
#[derive(Clone)]
pub struct RedisPageCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisPageCache {
    /// Connect a pooled client to `url` (e.g. `redis://localhost`).
    pub async fn connect(url: &str) -> Result<Self, PageCacheError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|error| PageCacheError::backend(error.to_string()))?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|error| PageCacheError::backend(error.to_string()))?;
        Ok(Self { pool })
    }

    async fn conn(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, PageCacheError> {
        self.pool
            .get()
            .await
            .map_err(|error| PageCacheError::backend(error.to_string()))
    }

    fn version_key(prefix: &str) -> String {
        format!("{prefix}:v")
    }

    async fn versioned_key(
        conn: &mut PooledConnection<'_, RedisConnectionManager>,
        prefix: &str,
        key: &str,
    ) -> Result<String, PageCacheError> {
        let version: Option<u64> = conn
            .get(Self::version_key(prefix))
            .await
            .map_err(|error| PageCacheError::backend(error.to_string()))?;
        Ok(format!("{prefix}:{}:{key}", version.unwrap_or(0)))
    }
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<String>, PageCacheError> {
        let mut conn = self.conn().await?;
        let full_key = Self::versioned_key(&mut conn, prefix, key).await?;
        conn.get(full_key)
            .await
            .map_err(|error| PageCacheError::backend(error.to_string()))
    }

    async fn put(
        &self,
        prefix: &str,
        key: &str,
        body: &str,
        ttl: Duration,
    ) -> Result<(), PageCacheError> {
        let mut conn = self.conn().await?;
        let full_key = Self::versioned_key(&mut conn, prefix, key).await?;
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(full_key, body, seconds)
            .await
            .map_err(|error| PageCacheError::backend(error.to_string()))
    }

    async fn purge(&self, prefix: &str) -> Result<(), PageCacheError> {
        let mut conn = self.conn().await?;
        conn.incr::<_, _, i64>(Self::version_key(prefix), 1)
            .await
            .map(|_| ())
            .map_err(|error| PageCacheError::backend(error.to_string()))
    }
}
