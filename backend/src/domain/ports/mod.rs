//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories, the page cache) describe how the domain
//! expects to reach storage; driving ports (queries, commands, login) are
//! what inbound adapters consume. Each driven port exposes strongly typed
//! errors so adapters map their failures into predictable variants instead
//! of stringly typed results.

mod comment_repository;
mod feed_query;
pub mod fixtures;
mod follow_command;
mod follow_repository;
mod group_repository;
mod login_service;
mod macros;
mod page_cache;
mod post_command;
mod post_repository;
mod user_repository;

pub use comment_repository::{CommentPersistenceError, CommentRepository};
pub use feed_query::FeedQuery;
pub use fixtures::FixtureStore;
pub use follow_command::FollowCommand;
pub use follow_repository::{FollowPersistenceError, FollowRepository};
pub use group_repository::{GroupPersistenceError, GroupRepository};
pub use login_service::LoginService;
pub use page_cache::{PageCache, PageCacheError};
pub use post_command::{EditAccess, EditOutcome, PostCommand};
pub use post_repository::{FeedFilter, PostPersistenceError, PostRepository};
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
#[cfg(test)]
pub use page_cache::MockPageCache;
#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
