//! Builders for the HTTP state: repository-backed services when a database
//! is configured, fixture-backed services otherwise.

use std::io;
use std::sync::Arc;

use pagination::Paginator;
use tracing::warn;

use crate::domain::ports::{
    CommentRepository, FixtureStore, FollowRepository, GroupRepository, PageCache,
    PostRepository, UserRepository,
};
use crate::domain::{
    DirectoryLoginService, FeedService, FollowCommandService, PostCommandService,
};
use crate::inbound::http::state::{FeedCachePolicy, HttpState};
use crate::outbound::cache::{MemoryPageCache, RedisPageCache};
use crate::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselFollowRepository, DieselGroupRepository,
    DieselPostRepository, DieselUserRepository, PoolConfig,
};

use super::ServerConfig;

/// The repository set every service is assembled over.
struct Repositories {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
    follows: Arc<dyn FollowRepository>,
}

fn assemble(
    repos: Repositories,
    paginator: Paginator,
    page_cache: Arc<dyn PageCache>,
    cache_policy: FeedCachePolicy,
) -> HttpState {
    let feeds = FeedService::new(
        Arc::clone(&repos.posts),
        Arc::clone(&repos.groups),
        Arc::clone(&repos.users),
        Arc::clone(&repos.comments),
        Arc::clone(&repos.follows),
        paginator,
    );
    let posts = PostCommandService::new(
        Arc::clone(&repos.posts),
        Arc::clone(&repos.groups),
        Arc::clone(&repos.users),
        Arc::clone(&repos.comments),
    );
    let follows = FollowCommandService::new(Arc::clone(&repos.users), Arc::clone(&repos.follows));
    let login = DirectoryLoginService::new(Arc::clone(&repos.users));
    HttpState {
        login: Arc::new(login),
        feeds: Arc::new(feeds),
        posts: Arc::new(posts),
        follows: Arc::new(follows),
        page_cache,
        cache_policy,
    }
}

/// Build an [`HttpState`] over a shared fixture store.
///
/// Used by the server when no database is configured, and by tests that
/// want to seed and inspect state directly.
///
/// # Panics
/// Panics on a zero page size; callers configure it from a validated source.
#[must_use]
pub fn fixture_http_state(
    store: &Arc<FixtureStore>,
    page_size: usize,
    cache_policy: FeedCachePolicy,
) -> HttpState {
    let paginator = Paginator::new(page_size).expect("page size must be non-zero");
    let repos = Repositories {
        posts: Arc::clone(store) as Arc<dyn PostRepository>,
        groups: Arc::clone(store) as Arc<dyn GroupRepository>,
        users: Arc::clone(store) as Arc<dyn UserRepository>,
        comments: Arc::clone(store) as Arc<dyn CommentRepository>,
        follows: Arc::clone(store) as Arc<dyn FollowRepository>,
    };
    assemble(
        repos,
        paginator,
        Arc::new(MemoryPageCache::new()),
        cache_policy,
    )
}

/// Build the HTTP state described by `config`.
///
/// A configured database selects the Diesel adapters; otherwise the server
/// runs over an in-memory fixture store. A configured Redis URL selects the
/// shared page cache; otherwise the in-process one.
pub async fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let paginator = Paginator::new(config.page_size)
        .map_err(|error| io::Error::other(format!("invalid page size: {error}")))?;

    let page_cache: Arc<dyn PageCache> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisPageCache::connect(url)
                .await
                .map_err(|error| io::Error::other(format!("redis cache unavailable: {error}")))?,
        ),
        None => Arc::new(MemoryPageCache::new()),
    };

    let repos = match &config.database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|error| io::Error::other(format!("database unavailable: {error}")))?;
            Repositories {
                posts: Arc::new(DieselPostRepository::new(pool.clone())),
                groups: Arc::new(DieselGroupRepository::new(pool.clone())),
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                comments: Arc::new(DieselCommentRepository::new(pool.clone())),
                follows: Arc::new(DieselFollowRepository::new(pool)),
            }
        }
        None => {
            warn!("no database configured; serving from an in-memory fixture store");
            let store = Arc::new(FixtureStore::new());
            Repositories {
                posts: Arc::clone(&store) as Arc<dyn PostRepository>,
                groups: Arc::clone(&store) as Arc<dyn GroupRepository>,
                users: Arc::clone(&store) as Arc<dyn UserRepository>,
                comments: Arc::clone(&store) as Arc<dyn CommentRepository>,
                follows: store as Arc<dyn FollowRepository>,
            }
        }
    };

    Ok(assemble(
        repos,
        paginator,
        page_cache,
        config.cache_policy.clone(),
    ))
}
