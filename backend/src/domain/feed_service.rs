//! Read-path assembly for feed and detail views.
//!
//! [`FeedService`] implements the [`FeedQuery`] driving port over the
//! repository ports. All feeds share one pagination policy: fixed page size,
//! newest first, out-of-range page numbers clamped rather than rejected.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, Paginator};

use crate::domain::error::Error;
use crate::domain::feed::{GroupFeed, PostDetail, PostEntry, ProfileFeed};
use crate::domain::group::{Group, GroupSlug};
use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, FeedFilter, FeedQuery, FollowPersistenceError,
    FollowRepository, GroupPersistenceError, GroupRepository, PostPersistenceError,
    PostRepository, UserPersistenceError, UserRepository,
};
use crate::domain::post::PostId;
use crate::domain::user::{UserId, Username};

/// Read-path assembler over the repository ports.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
    follows: Arc<dyn FollowRepository>,
    paginator: Paginator,
}

impl FeedService {
    /// Assemble the service over its repositories.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
        follows: Arc<dyn FollowRepository>,
        paginator: Paginator,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            comments,
            follows,
            paginator,
        }
    }

    /// Count, clamp, then fetch one page for `filter`.
    async fn page_for(&self, filter: &FeedFilter, page: usize) -> Result<Page<PostEntry>, Error> {
        let total = self.posts.count(filter).await.map_err(map_post_error)?;
        let window = self.paginator.window(page, total);
        let items = self
            .posts
            .list_page(filter, window.offset, window.limit)
            .await
            .map_err(map_post_error)?;
        Ok(self.paginator.assemble(items, window.number, total))
    }
}

pub(crate) fn map_post_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => Error::service_unavailable(message),
        PostPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_group_error(error: GroupPersistenceError) -> Error {
    match error {
        GroupPersistenceError::Connection { message } => Error::service_unavailable(message),
        GroupPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_comment_error(error: CommentPersistenceError) -> Error {
    match error {
        CommentPersistenceError::Connection { message } => Error::service_unavailable(message),
        CommentPersistenceError::Query { message } => Error::internal(message),
    }
}

pub(crate) fn map_follow_error(error: FollowPersistenceError) -> Error {
    match error {
        FollowPersistenceError::Connection { message } => Error::service_unavailable(message),
        FollowPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl FeedQuery for FeedService {
    async fn global_feed(&self, page: usize) -> Result<Page<PostEntry>, Error> {
        self.page_for(&FeedFilter::All, page).await
    }

    async fn group_feed(&self, slug: &GroupSlug, page: usize) -> Result<GroupFeed, Error> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await
            .map_err(map_group_error)?
            .ok_or_else(|| Error::not_found("group not found"))?;
        let page = self.page_for(&FeedFilter::Group(group.id), page).await?;
        Ok(GroupFeed { group, page })
    }

    async fn profile_feed(
        &self,
        username: &Username,
        viewer: Option<&UserId>,
        page: usize,
    ) -> Result<ProfileFeed, Error> {
        let author = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        let page = self.page_for(&FeedFilter::Author(author.id), page).await?;
        let following = match viewer {
            Some(viewer) => Some(
                self.follows
                    .exists(viewer, &author.id)
                    .await
                    .map_err(map_follow_error)?,
            ),
            None => None,
        };
        Ok(ProfileFeed {
            post_count: page.total_items(),
            author,
            following,
            page,
        })
    }

    async fn post_detail(&self, id: &PostId) -> Result<PostDetail, Error> {
        let post = self
            .posts
            .find_entry(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found("post not found"))?;
        let author_post_count = self
            .posts
            .count(&FeedFilter::Author(post.author.id))
            .await
            .map_err(map_post_error)?;
        let comments = self
            .comments
            .list_for_post(id)
            .await
            .map_err(map_comment_error)?;
        Ok(PostDetail {
            post,
            author_post_count,
            comments,
        })
    }

    async fn follow_feed(&self, viewer: &UserId, page: usize) -> Result<Page<PostEntry>, Error> {
        let authors = self
            .follows
            .authors_followed_by(viewer)
            .await
            .map_err(map_follow_error)?;
        self.page_for(&FeedFilter::AuthorsAmong(authors), page).await
    }

    async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        self.groups.list_all().await.map_err(map_group_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::feed::AuthorRef;
    use crate::domain::ports::{
        MockCommentRepository, MockFollowRepository, MockGroupRepository, MockPostRepository,
        MockUserRepository,
    };
    use crate::domain::post::PostText;
    use crate::domain::user::User;
    use chrono::Utc;

    fn entry(author: &User, text: &str) -> PostEntry {
        PostEntry {
            id: PostId::random(),
            author: AuthorRef {
                id: author.id,
                username: author.username.clone(),
            },
            group: None,
            text: PostText::new(text).expect("non-empty"),
            has_image: false,
            created_at: Utc::now(),
        }
    }

    fn user(name: &str) -> User {
        User::register(Username::new(name).expect("valid username"))
    }

    struct Mocks {
        posts: MockPostRepository,
        groups: MockGroupRepository,
        users: MockUserRepository,
        comments: MockCommentRepository,
        follows: MockFollowRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                posts: MockPostRepository::new(),
                groups: MockGroupRepository::new(),
                users: MockUserRepository::new(),
                comments: MockCommentRepository::new(),
                follows: MockFollowRepository::new(),
            }
        }

        fn into_service(self) -> FeedService {
            FeedService::new(
                Arc::new(self.posts),
                Arc::new(self.groups),
                Arc::new(self.users),
                Arc::new(self.comments),
                Arc::new(self.follows),
                Paginator::new(10).expect("page size"),
            )
        }
    }

    #[tokio::test]
    async fn out_of_range_pages_clamp_to_the_last_page() {
        let mut mocks = Mocks::new();
        let ada = user("ada");
        let row = entry(&ada, "hello");
        mocks.posts.expect_count().returning(|_| Ok(12));
        mocks
            .posts
            .expect_list_page()
            .withf(|_, offset, limit| *offset == 10 && *limit == 10)
            .returning(move |_, _, _| Ok(vec![row.clone()]));

        let page = mocks
            .into_service()
            .global_feed(99)
            .await
            .expect("clamped page");
        assert_eq!(page.number(), 2);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.total_items(), 12);
    }

    #[tokio::test]
    async fn unknown_group_slug_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.groups.expect_find_by_slug().returning(|_| Ok(None));

        let slug = GroupSlug::new("missing").expect("valid slug");
        let error = mocks
            .into_service()
            .group_feed(&slug, 1)
            .await
            .expect_err("missing group");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn profile_feed_reports_follow_state_for_authenticated_viewers() {
        let mut mocks = Mocks::new();
        let ada = user("ada");
        let author_id = ada.id;
        mocks
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(ada.clone())));
        mocks.posts.expect_count().returning(|_| Ok(0));
        mocks.posts.expect_list_page().returning(|_, _, _| Ok(Vec::new()));
        mocks
            .follows
            .expect_exists()
            .withf(move |_, author| *author == author_id)
            .returning(|_, _| Ok(true));

        let viewer = UserId::random();
        let username = Username::new("ada").expect("valid username");
        let profile = mocks
            .into_service()
            .profile_feed(&username, Some(&viewer), 1)
            .await
            .expect("profile");
        assert_eq!(profile.following, Some(true));
        assert_eq!(profile.post_count, 0);
    }

    #[tokio::test]
    async fn anonymous_profile_views_carry_no_follow_state() {
        let mut mocks = Mocks::new();
        let ada = user("ada");
        mocks
            .users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(ada.clone())));
        mocks.posts.expect_count().returning(|_| Ok(0));
        mocks.posts.expect_list_page().returning(|_, _, _| Ok(Vec::new()));

        let username = Username::new("ada").expect("valid username");
        let profile = mocks
            .into_service()
            .profile_feed(&username, None, 1)
            .await
            .expect("profile");
        assert_eq!(profile.following, None);
    }

    #[tokio::test]
    async fn follow_feed_filters_to_followed_authors() {
        let mut mocks = Mocks::new();
        let followed = UserId::random();
        mocks
            .follows
            .expect_authors_followed_by()
            .returning(move |_| Ok(vec![followed]));
        mocks
            .posts
            .expect_count()
            .withf(move |filter| {
                matches!(filter, FeedFilter::AuthorsAmong(authors) if authors == &vec![followed])
            })
            .returning(|_| Ok(0));
        mocks
            .posts
            .expect_list_page()
            .returning(|_, _, _| Ok(Vec::new()));

        let viewer = UserId::random();
        let page = mocks
            .into_service()
            .follow_feed(&viewer, 1)
            .await
            .expect("feed");
        assert_eq!(page.total_items(), 0);
    }

    #[tokio::test]
    async fn post_detail_joins_comments_and_author_count() {
        let mut mocks = Mocks::new();
        let ada = user("ada");
        let row = entry(&ada, "hello");
        let id = row.id;
        mocks
            .posts
            .expect_find_entry()
            .returning(move |_| Ok(Some(row.clone())));
        mocks.posts.expect_count().returning(|_| Ok(7));
        mocks
            .comments
            .expect_list_for_post()
            .returning(|_| Ok(Vec::new()));

        let detail = mocks
            .into_service()
            .post_detail(&id)
            .await
            .expect("detail");
        assert_eq!(detail.author_post_count, 7);
        assert!(detail.comments.is_empty());
    }

    #[tokio::test]
    async fn missing_post_detail_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.posts.expect_find_entry().returning(|_| Ok(None));

        let error = mocks
            .into_service()
            .post_detail(&PostId::random())
            .await
            .expect_err("missing post");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
