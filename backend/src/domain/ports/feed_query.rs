//! Driving port for read-path view assembly.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::error::Error;
use crate::domain::feed::{GroupFeed, PostDetail, PostEntry, ProfileFeed};
use crate::domain::group::{Group, GroupSlug};
use crate::domain::post::PostId;
use crate::domain::user::{UserId, Username};

/// Read-path assembler consumed by the HTTP adapter.
///
/// Each operation produces a page of pre-joined entries plus the contextual
/// metadata its view renders. Pagination is uniform: fixed page size,
/// out-of-range page numbers clamp to the nearest valid page.
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// All posts, newest first.
    async fn global_feed(&self, page: usize) -> Result<Page<PostEntry>, Error>;

    /// Posts in one group plus the group record; `NotFound` for an unknown
    /// slug.
    async fn group_feed(&self, slug: &GroupSlug, page: usize) -> Result<GroupFeed, Error>;

    /// One author's posts plus their total count and, for authenticated
    /// viewers, whether the viewer already follows them.
    async fn profile_feed(
        &self,
        username: &Username,
        viewer: Option<&UserId>,
        page: usize,
    ) -> Result<ProfileFeed, Error>;

    /// A single post with its author's post count and full comment thread.
    async fn post_detail(&self, id: &PostId) -> Result<PostDetail, Error>;

    /// Posts by authors the viewer follows, newest first.
    async fn follow_feed(&self, viewer: &UserId, page: usize) -> Result<Page<PostEntry>, Error>;

    /// Every group, for form choice lists.
    async fn list_groups(&self) -> Result<Vec<Group>, Error>;
}
