//! Response DTOs for the HTTP adapter.
//!
//! Domain read models convert into these plain shapes; timestamps render as
//! RFC 3339 strings so clients never see internal representations.

use pagination::Page;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    CommentEntry, Group, GroupFeed, PostDetail, PostEntry, ProfileFeed, User,
};

/// Author columns rendered with a feed entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorResponse {
    /// Author identifier.
    pub id: String,
    /// Author handle for profile links.
    pub username: String,
}

/// Group columns rendered with a feed entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupSummaryResponse {
    /// Display title.
    pub title: String,
    /// URL-safe identifier for group links.
    pub slug: String,
}

/// One post in a feed or detail response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    /// Post identifier.
    pub id: String,
    /// Post author.
    pub author: AuthorResponse,
    /// Group summary, when the post is grouped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupSummaryResponse>,
    /// Body text.
    pub text: String,
    /// Whether an image attachment is stored for the post.
    pub has_image: bool,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<PostEntry> for PostResponse {
    fn from(entry: PostEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            author: AuthorResponse {
                id: entry.author.id.to_string(),
                username: entry.author.username.into(),
            },
            group: entry.group.map(|group| GroupSummaryResponse {
                title: group.title,
                slug: group.slug.into(),
            }),
            text: entry.text.into(),
            has_image: entry.has_image,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// One comment under a post detail response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    /// Comment identifier.
    pub id: String,
    /// Comment author.
    pub author: AuthorResponse,
    /// Body text.
    pub text: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl From<CommentEntry> for CommentResponse {
    fn from(entry: CommentEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            author: AuthorResponse {
                id: entry.author.id.to_string(),
                username: entry.author.username.into(),
            },
            text: entry.text.into(),
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

/// One page of posts plus paging controls.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedPageResponse {
    /// Posts on this page, newest first.
    pub items: Vec<PostResponse>,
    /// 1-based page number after clamping.
    pub page: usize,
    /// Fixed page size.
    pub page_size: usize,
    /// Total posts across all pages.
    pub total_items: usize,
    /// Total pages.
    pub total_pages: usize,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

impl From<Page<PostEntry>> for FeedPageResponse {
    fn from(page: Page<PostEntry>) -> Self {
        let number = page.number();
        let page_size = page.page_size();
        let total_items = page.total_items();
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        Self {
            items: page.into_items().into_iter().map(PostResponse::from).collect(),
            page: number,
            page_size,
            total_items,
            total_pages,
            has_next,
            has_previous,
        }
    }
}

/// A group record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupResponse {
    /// Display title.
    pub title: String,
    /// URL-safe identifier.
    pub slug: String,
    /// Free-form description.
    pub description: String,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            title: group.title,
            slug: group.slug.into(),
            description: group.description,
        }
    }
}

/// Group page: the group record plus its posts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupFeedResponse {
    /// The group itself.
    pub group: GroupResponse,
    /// Posts filtered to the group.
    pub feed: FeedPageResponse,
}

impl From<GroupFeed> for GroupFeedResponse {
    fn from(view: GroupFeed) -> Self {
        Self {
            group: view.group.into(),
            feed: view.page.into(),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Stable identifier.
    pub id: String,
    /// Unique handle.
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.into(),
        }
    }
}

/// Author profile page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// The profiled author.
    pub author: UserResponse,
    /// Total post count for the author.
    pub post_count: usize,
    /// Whether the viewer follows this author; absent for anonymous viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<bool>,
    /// The author's posts.
    pub feed: FeedPageResponse,
}

impl From<ProfileFeed> for ProfileResponse {
    fn from(view: ProfileFeed) -> Self {
        Self {
            author: view.author.into(),
            post_count: view.post_count,
            following: view.following,
            feed: view.page.into(),
        }
    }
}

/// Single-post page with its comment thread.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostDetailResponse {
    /// The post.
    pub post: PostResponse,
    /// Total post count for the post's author.
    pub author_post_count: usize,
    /// Every comment, oldest first.
    pub comments: Vec<CommentResponse>,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(view: PostDetail) -> Self {
        Self {
            post: view.post.into(),
            author_post_count: view.author_post_count,
            comments: view.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Context for rendering the create/edit post form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostFormContextResponse {
    /// Whether the form edits an existing post.
    pub is_edit: bool,
    /// The post being edited, absent on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
    /// Group choices for the form's select field.
    pub groups: Vec<GroupResponse>,
}
