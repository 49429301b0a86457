//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use pagination::DEFAULT_PAGE_SIZE;

use crate::inbound::http::state::FeedCachePolicy;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
    pub(crate) redis_url: Option<String>,
    pub(crate) page_size: usize,
    pub(crate) cache_policy: FeedCachePolicy,
}

impl ServerConfig {
    /// Construct a server configuration with default feed settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            database_url: None,
            redis_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            cache_policy: FeedCachePolicy::default(),
        }
    }

    /// Attach a PostgreSQL connection URL for persistence adapters.
    ///
    /// Without one, the server runs over the in-memory fixture store.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Attach a Redis URL for the page cache.
    ///
    /// Without one, the in-process cache is used.
    #[must_use]
    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    /// Override the fixed feed page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the global-feed cache policy.
    #[must_use]
    pub fn with_cache_policy(mut self, policy: FeedCachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// The configured database URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
