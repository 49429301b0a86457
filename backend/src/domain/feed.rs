//! Read models assembled for feed and detail views.
//!
//! Every feed entry arrives pre-joined with its author handle and group
//! summary so inbound adapters never perform per-entry lookups.

use chrono::{DateTime, Utc};
use pagination::Page;
use serde::Serialize;

use super::comment::{CommentId, CommentText};
use super::group::{Group, GroupId, GroupSlug};
use super::post::{PostId, PostText};
use super::user::{User, UserId, Username};

/// Author columns joined into a feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    /// Author identifier.
    pub id: UserId,
    /// Author handle for profile links.
    pub username: Username,
}

/// Group columns joined into a feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRef {
    /// Group identifier.
    pub id: GroupId,
    /// Display title.
    pub title: String,
    /// URL-safe identifier for group links.
    pub slug: GroupSlug,
}

/// One post as it appears in a feed or detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostEntry {
    /// Post identifier.
    pub id: PostId,
    /// Joined author columns.
    pub author: AuthorRef,
    /// Joined group columns, when the post is grouped.
    pub group: Option<GroupRef>,
    /// Body text.
    pub text: PostText,
    /// Whether an image attachment is stored for the post.
    pub has_image: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One comment as it appears under a post detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentEntry {
    /// Comment identifier.
    pub id: CommentId,
    /// Joined author columns.
    pub author: AuthorRef,
    /// Body text.
    pub text: CommentText,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Group page: the group record plus its paginated posts.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFeed {
    /// The group itself.
    pub group: Group,
    /// Posts filtered to the group, newest first.
    pub page: Page<PostEntry>,
}

/// Author profile page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFeed {
    /// The profiled author.
    pub author: User,
    /// Total post count for the author across all pages.
    pub post_count: usize,
    /// Whether the viewer follows this author; `None` for anonymous viewers.
    pub following: Option<bool>,
    /// The author's posts, newest first.
    pub page: Page<PostEntry>,
}

/// Single-post page with its full comment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    /// The post, pre-joined for display.
    pub post: PostEntry,
    /// Total post count for the post's author.
    pub author_post_count: usize,
    /// Every comment on the post, oldest first.
    pub comments: Vec<CommentEntry>,
}
