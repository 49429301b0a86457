//! Write-path services for posts and comments.
//!
//! [`PostCommandService`] implements the [`PostCommand`] driving port:
//! validation via the form layer, ownership enforcement for edits, and the
//! author-from-session invariant for creates and comments.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::Error;
use crate::domain::feed::{AuthorRef, GroupRef, PostEntry};
use crate::domain::feed_service::{
    map_comment_error, map_group_error, map_post_error, map_user_error,
};
use crate::domain::forms::{CommentForm, FieldErrors, PostForm};
use crate::domain::group::{Group, GroupSlug};
use crate::domain::ports::{
    CommentRepository, EditAccess, EditOutcome, GroupRepository, PostCommand, PostRepository,
    UserRepository,
};
use crate::domain::post::{Post, PostChanges, PostId};
use crate::domain::user::UserId;

/// Post and comment write path over the repository ports.
#[derive(Clone)]
pub struct PostCommandService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostCommandService {
    /// Assemble the service over its repositories.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            comments,
        }
    }

    /// Resolve a submitted group slug against storage.
    ///
    /// An unknown slug is a validation failure on the `group` field, the
    /// same surface as a malformed one.
    async fn resolve_group(&self, slug: Option<GroupSlug>) -> Result<Option<Group>, Error> {
        let Some(slug) = slug else { return Ok(None) };
        self.groups
            .find_by_slug(&slug)
            .await
            .map_err(map_group_error)?
            .map(Some)
            .ok_or_else(|| FieldErrors::single("group", "unknown group").into_error())
    }
}

#[async_trait]
impl PostCommand for PostCommandService {
    async fn create_post(&self, author: &UserId, form: PostForm) -> Result<PostEntry, Error> {
        let parsed = form.validate().map_err(FieldErrors::into_error)?;
        let group = self.resolve_group(parsed.group).await?;
        // The session names the author; a stale id means the session outlived
        // the account.
        let author = self
            .users
            .find_by_id(author)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;

        let post = Post::create(
            author.id,
            parsed.text,
            group.as_ref().map(|g| g.id),
            parsed.image,
        );
        self.posts.insert(&post).await.map_err(map_post_error)?;

        Ok(PostEntry {
            id: post.id,
            author: AuthorRef {
                id: author.id,
                username: author.username,
            },
            group: group.map(|g| GroupRef {
                id: g.id,
                title: g.title,
                slug: g.slug,
            }),
            has_image: post.image.is_some(),
            text: post.text,
            created_at: post.created_at,
        })
    }

    async fn load_for_edit(
        &self,
        requester: &UserId,
        id: &PostId,
    ) -> Result<EditAccess, Error> {
        let entry = self
            .posts
            .find_entry(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found("post not found"))?;
        if entry.author.id != *requester {
            return Ok(EditAccess::NotOwner);
        }
        Ok(EditAccess::Granted(entry))
    }

    async fn edit_post(
        &self,
        requester: &UserId,
        id: &PostId,
        form: PostForm,
    ) -> Result<EditOutcome, Error> {
        let entry = self
            .posts
            .find_entry(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found("post not found"))?;
        // Ownership is decided before validation: a non-owner learns nothing
        // about the form, they are just sent back to the detail view.
        if entry.author.id != *requester {
            return Ok(EditOutcome::NotOwner);
        }

        let parsed = form.validate().map_err(FieldErrors::into_error)?;
        let group = self.resolve_group(parsed.group).await?;
        let changes = PostChanges {
            text: parsed.text,
            group: group.map(|g| g.id),
            image: parsed.image,
        };
        let applied = self
            .posts
            .apply_changes(id, &changes)
            .await
            .map_err(map_post_error)?;
        if !applied {
            return Err(Error::not_found("post not found"));
        }
        Ok(EditOutcome::Updated)
    }

    async fn add_comment(
        &self,
        author: &UserId,
        post: &PostId,
        form: CommentForm,
    ) -> Result<(), Error> {
        // 404 for a missing post comes before form validation.
        self.posts
            .find_entry(post)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found("post not found"))?;
        let parsed = form.validate().map_err(FieldErrors::into_error)?;
        let comment = Comment::create(*post, *author, parsed.text);
        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockCommentRepository, MockGroupRepository, MockPostRepository, MockUserRepository,
    };
    use crate::domain::post::PostText;
    use crate::domain::user::{User, Username};
    use chrono::Utc;

    fn user(name: &str) -> User {
        User::register(Username::new(name).expect("valid username"))
    }

    fn entry_owned_by(owner: &User) -> PostEntry {
        PostEntry {
            id: PostId::random(),
            author: AuthorRef {
                id: owner.id,
                username: owner.username.clone(),
            },
            group: None,
            text: PostText::new("original").expect("non-empty"),
            has_image: false,
            created_at: Utc::now(),
        }
    }

    struct Mocks {
        posts: MockPostRepository,
        groups: MockGroupRepository,
        users: MockUserRepository,
        comments: MockCommentRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                posts: MockPostRepository::new(),
                groups: MockGroupRepository::new(),
                users: MockUserRepository::new(),
                comments: MockCommentRepository::new(),
            }
        }

        fn into_service(self) -> PostCommandService {
            PostCommandService::new(
                Arc::new(self.posts),
                Arc::new(self.groups),
                Arc::new(self.users),
                Arc::new(self.comments),
            )
        }
    }

    #[tokio::test]
    async fn create_post_stamps_the_session_author() {
        let mut mocks = Mocks::new();
        let ada = user("ada");
        let ada_id = ada.id;
        mocks
            .users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(ada.clone())));
        mocks
            .posts
            .expect_insert()
            .withf(move |post| post.author == ada_id)
            .times(1)
            .returning(|_| Ok(()));

        let form = PostForm {
            text: "hello".to_owned(),
            ..PostForm::default()
        };
        let entry = mocks
            .into_service()
            .create_post(&ada_id, form)
            .await
            .expect("created");
        assert_eq!(entry.author.id, ada_id);
        assert_eq!(entry.author.username.as_str(), "ada");
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let mut mocks = Mocks::new();
        mocks.posts.expect_insert().times(0);

        let form = PostForm {
            text: "   ".to_owned(),
            ..PostForm::default()
        };
        let error = mocks
            .into_service()
            .create_post(&UserId::random(), form)
            .await
            .expect_err("blank text");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn unknown_group_slug_is_a_field_error() {
        let mut mocks = Mocks::new();
        mocks.groups.expect_find_by_slug().returning(|_| Ok(None));
        mocks.posts.expect_insert().times(0);

        let form = PostForm {
            text: "hello".to_owned(),
            group: Some("ghost-town".to_owned()),
            ..PostForm::default()
        };
        let error = mocks
            .into_service()
            .create_post(&UserId::random(), form)
            .await
            .expect_err("unknown group");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("field details").clone();
        assert_eq!(details["fields"]["group"][0], "unknown group");
    }

    #[tokio::test]
    async fn non_owner_edits_are_silently_refused() {
        let mut mocks = Mocks::new();
        let owner = user("ada");
        let row = entry_owned_by(&owner);
        mocks
            .posts
            .expect_find_entry()
            .returning(move |_| Ok(Some(row.clone())));
        mocks.posts.expect_apply_changes().times(0);

        let stranger = UserId::random();
        let form = PostForm {
            text: "hijacked".to_owned(),
            ..PostForm::default()
        };
        let outcome = mocks
            .into_service()
            .edit_post(&stranger, &PostId::random(), form)
            .await
            .expect("outcome");
        assert_eq!(outcome, EditOutcome::NotOwner);
    }

    #[tokio::test]
    async fn owner_edits_apply_changes() {
        let mut mocks = Mocks::new();
        let owner = user("ada");
        let owner_id = owner.id;
        let row = entry_owned_by(&owner);
        mocks
            .posts
            .expect_find_entry()
            .returning(move |_| Ok(Some(row.clone())));
        mocks
            .posts
            .expect_apply_changes()
            .withf(|_, changes| changes.text.as_str() == "updated")
            .times(1)
            .returning(|_, _| Ok(true));

        let form = PostForm {
            text: "updated".to_owned(),
            ..PostForm::default()
        };
        let outcome = mocks
            .into_service()
            .edit_post(&owner_id, &PostId::random(), form)
            .await
            .expect("outcome");
        assert_eq!(outcome, EditOutcome::Updated);
    }

    #[tokio::test]
    async fn editing_a_missing_post_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.posts.expect_find_entry().returning(|_| Ok(None));

        let form = PostForm {
            text: "updated".to_owned(),
            ..PostForm::default()
        };
        let error = mocks
            .into_service()
            .edit_post(&UserId::random(), &PostId::random(), form)
            .await
            .expect_err("missing post");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn commenting_on_a_missing_post_is_not_found_before_validation() {
        let mut mocks = Mocks::new();
        mocks.posts.expect_find_entry().returning(|_| Ok(None));
        mocks.comments.expect_insert().times(0);

        // Blank text would also fail validation, but the 404 must win.
        let form = CommentForm { text: " ".to_owned() };
        let error = mocks
            .into_service()
            .add_comment(&UserId::random(), &PostId::random(), form)
            .await
            .expect_err("missing post");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn comments_record_the_session_author() {
        let mut mocks = Mocks::new();
        let owner = user("ada");
        let row = entry_owned_by(&owner);
        let post_id = row.id;
        mocks
            .posts
            .expect_find_entry()
            .returning(move |_| Ok(Some(row.clone())));
        let commenter = UserId::random();
        mocks
            .comments
            .expect_insert()
            .withf(move |comment| comment.author == commenter && comment.post == post_id)
            .times(1)
            .returning(|_| Ok(()));

        let form = CommentForm {
            text: "nice".to_owned(),
        };
        mocks
            .into_service()
            .add_comment(&commenter, &post_id, form)
            .await
            .expect("comment stored");
    }
}
