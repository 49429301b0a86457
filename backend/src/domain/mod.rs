//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities, the form/validation layer, and
//! the driving services behind the HTTP adapter. Types stay immutable where
//! the data model demands it (`author` and `created_at` on posts never
//! change) and document their invariants in Rustdoc.

pub mod auth;
pub mod comment;
pub mod error;
pub mod feed;
pub mod feed_service;
pub mod follow_service;
pub mod forms;
pub mod group;
pub mod image;
pub mod login;
pub mod ports;
pub mod post;
pub mod post_service;
mod slug;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::comment::{Comment, CommentId, CommentText, CommentValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::feed::{AuthorRef, CommentEntry, GroupFeed, GroupRef, PostDetail, PostEntry, ProfileFeed};
pub use self::feed_service::FeedService;
pub use self::follow_service::FollowCommandService;
pub use self::forms::{CommentForm, FieldErrors, ParsedCommentForm, ParsedPostForm, PostForm};
pub use self::group::{Group, GroupId, GroupSlug, GroupValidationError};
pub use self::image::{ImageFormat, ImagePayload, ImageValidationError};
pub use self::login::DirectoryLoginService;
pub use self::post::{Post, PostChanges, PostId, PostText, PostValidationError};
pub use self::post_service::PostCommandService;
pub use self::user::{User, UserId, UserValidationError, Username};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
