//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{Comment, CommentEntry, PostId};

use super::diesel_helpers::{AdapterFailure, classify_diesel_error, classify_pool_error};
use super::models::{CommentRow, NewCommentRow, UserRow, comment_entry_from_rows};
use super::pool::DbPool;
use super::schema::{comments, users};

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: AdapterFailure) -> CommentPersistenceError {
    match failure {
        AdapterFailure::Connection(message) => CommentPersistenceError::connection(message),
        AdapterFailure::Query(message) => CommentPersistenceError::query(message),
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        diesel::insert_into(comments::table)
            .values(NewCommentRow {
                id: comment.id.as_uuid(),
                post_id: comment.post.as_uuid(),
                author_id: comment.author.as_uuid(),
                text: comment.text.as_str(),
                created_at: comment.created_at,
            })
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(())
    }

    async fn list_for_post(
        &self,
        post: &PostId,
    ) -> Result<Vec<CommentEntry>, CommentPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let rows: Vec<(CommentRow, UserRow)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post.as_uuid()))
            .order(comments::created_at.asc())
            .select((CommentRow::as_select(), UserRow::as_select()))
            .load::<(CommentRow, UserRow)>(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        rows.into_iter()
            .map(|(comment, author)| {
                comment_entry_from_rows(comment, author).map_err(CommentPersistenceError::query)
            })
            .collect()
    }
}
