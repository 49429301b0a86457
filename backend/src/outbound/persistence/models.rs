//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    AuthorRef, CommentEntry, CommentId, CommentText, Group, GroupId, GroupRef, GroupSlug,
    PostEntry, PostId, PostText, User, UserId, Username,
};

use super::schema::{comments, follows, groups, posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let username = Username::new(self.username)
            .map_err(|err| format!("stored username is invalid: {err}"))?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            username,
            created_at: self.created_at,
        })
    }

    pub(crate) fn into_author_ref(self) -> Result<AuthorRef, String> {
        let user = self.into_domain()?;
        Ok(AuthorRef {
            id: user.id,
            username: user.username,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the groups table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl GroupRow {
    pub(crate) fn into_domain(self) -> Result<Group, String> {
        let slug =
            GroupSlug::new(self.slug).map_err(|err| format!("stored slug is invalid: {err}"))?;
        Ok(Group {
            id: GroupId::from_uuid(self.id),
            title: self.title,
            slug,
            description: self.description,
            created_at: self.created_at,
        })
    }

    pub(crate) fn into_group_ref(self) -> Result<GroupRef, String> {
        let group = self.into_domain()?;
        Ok(GroupRef {
            id: group.id,
            title: group.title,
            slug: group.slug,
        })
    }
}

/// Insertable struct for creating new group records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = groups)]
pub(crate) struct NewGroupRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "author columns come from the joined user row")]
    pub author_id: Uuid,
    #[expect(dead_code, reason = "group columns come from the joined group row")]
    pub group_id: Option<Uuid>,
    pub text: String,
    pub image: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

/// Assemble a pre-joined feed entry from one joined result row.
pub(crate) fn entry_from_rows(
    post: PostRow,
    author: UserRow,
    group: Option<GroupRow>,
) -> Result<PostEntry, String> {
    let text =
        PostText::new(post.text).map_err(|err| format!("stored post text is invalid: {err}"))?;
    Ok(PostEntry {
        id: PostId::from_uuid(post.id),
        author: author.into_author_ref()?,
        group: group.map(GroupRow::into_group_ref).transpose()?,
        text,
        has_image: post.image.is_some(),
        created_at: post.created_at,
    })
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub text: &'a str,
    pub image: Option<&'a [u8]>,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for editing post records.
///
/// `author_id` and `created_at` have no representation here, so edits can
/// never touch them. `group_id` is double-wrapped: the outer `Some` always
/// writes, clearing the column when the inner value is `None`. A `None`
/// `image` skips the column, keeping the stored attachment.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostUpdate<'a> {
    pub text: &'a str,
    pub group_id: Option<Option<Uuid>>,
    pub image: Option<&'a [u8]>,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "comments are always read in post context")]
    pub post_id: Uuid,
    #[expect(dead_code, reason = "author columns come from the joined user row")]
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Assemble a comment entry from one joined result row.
pub(crate) fn comment_entry_from_rows(
    comment: CommentRow,
    author: UserRow,
) -> Result<CommentEntry, String> {
    let text = CommentText::new(comment.text)
        .map_err(|err| format!("stored comment text is invalid: {err}"))?;
    Ok(CommentEntry {
        id: CommentId::from_uuid(comment.id),
        author: author.into_author_ref()?,
        text,
        created_at: comment.created_at,
    })
}

/// Insertable struct for creating new comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating follow edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow {
    pub user_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}
