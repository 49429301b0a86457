//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Feed reads join author and group columns in one query so the domain gets
//! fully assembled entries; feeds order newest first with the id as a
//! tiebreaker for stable pagination.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FeedFilter, PostPersistenceError, PostRepository};
use crate::domain::{ImagePayload, Post, PostChanges, PostEntry, PostId, UserId};

use super::diesel_helpers::{AdapterFailure, classify_diesel_error, classify_pool_error};
use super::models::{GroupRow, NewPostRow, PostRow, PostUpdate, UserRow, entry_from_rows};
use super::pool::DbPool;
use super::schema::{groups, posts, users};

type JoinedRow = (PostRow, UserRow, Option<GroupRow>);

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: AdapterFailure) -> PostPersistenceError {
    match failure {
        AdapterFailure::Connection(message) => PostPersistenceError::connection(message),
        AdapterFailure::Query(message) => PostPersistenceError::query(message),
    }
}

fn author_uuids(authors: &[UserId]) -> Vec<Uuid> {
    authors.iter().map(UserId::as_uuid).collect()
}

fn clamp_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        diesel::insert_into(posts::table)
            .values(NewPostRow {
                id: post.id.as_uuid(),
                author_id: post.author.as_uuid(),
                group_id: post.group.map(|group| group.as_uuid()),
                text: post.text.as_str(),
                image: post.image.as_ref().map(ImagePayload::bytes),
                created_at: post.created_at,
            })
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(())
    }

    async fn apply_changes(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<bool, PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let affected = diesel::update(posts::table.find(id.as_uuid()))
            .set(PostUpdate {
                text: changes.text.as_str(),
                group_id: Some(changes.group.map(|group| group.as_uuid())),
                image: changes.image.as_ref().map(ImagePayload::bytes),
            })
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(affected > 0)
    }

    async fn find_entry(&self, id: &PostId) -> Result<Option<PostEntry>, PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let row: Option<JoinedRow> = posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .filter(posts::id.eq(id.as_uuid()))
            .select((
                PostRow::as_select(),
                UserRow::as_select(),
                Option::<GroupRow>::as_select(),
            ))
            .first::<JoinedRow>(&mut conn)
            .await
            .optional()
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        row.map(|(post, author, group)| {
            entry_from_rows(post, author, group).map_err(PostPersistenceError::query)
        })
        .transpose()
    }

    async fn count(&self, filter: &FeedFilter) -> Result<usize, PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let count: i64 = match filter {
            FeedFilter::All => posts::table.count().get_result(&mut conn).await,
            FeedFilter::Group(group) => {
                posts::table
                    .filter(posts::group_id.eq(group.as_uuid()))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            FeedFilter::Author(author) => {
                posts::table
                    .filter(posts::author_id.eq(author.as_uuid()))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            FeedFilter::AuthorsAmong(authors) => {
                posts::table
                    .filter(posts::author_id.eq_any(author_uuids(authors)))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn list_page(
        &self,
        filter: &FeedFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PostEntry>, PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;

        let mut query = posts::table
            .inner_join(users::table)
            .left_join(groups::table)
            .select((
                PostRow::as_select(),
                UserRow::as_select(),
                Option::<GroupRow>::as_select(),
            ))
            .order((posts::created_at.desc(), posts::id.desc()))
            .into_boxed();
        query = match filter {
            FeedFilter::All => query,
            FeedFilter::Group(group) => query.filter(posts::group_id.eq(group.as_uuid())),
            FeedFilter::Author(author) => query.filter(posts::author_id.eq(author.as_uuid())),
            FeedFilter::AuthorsAmong(authors) => {
                query.filter(posts::author_id.eq_any(author_uuids(authors)))
            }
        };

        let rows: Vec<JoinedRow> = query
            .offset(clamp_to_i64(offset))
            .limit(clamp_to_i64(limit))
            .load::<JoinedRow>(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        rows.into_iter()
            .map(|(post, author, group)| {
                entry_from_rows(post, author, group).map_err(PostPersistenceError::query)
            })
            .collect()
    }
}
