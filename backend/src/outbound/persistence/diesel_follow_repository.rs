//! PostgreSQL-backed `FollowRepository` implementation using Diesel ORM.
//!
//! Edge uniqueness under concurrent follow requests is enforced here, not by
//! callers: the composite primary key plus a conflict-ignoring insert make
//! `create` an atomic get-or-create.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{FollowPersistenceError, FollowRepository};

use super::diesel_helpers::{AdapterFailure, classify_diesel_error, classify_pool_error};
use super::models::NewFollowRow;
use super::pool::DbPool;
use super::schema::follows;

/// Diesel-backed implementation of the `FollowRepository` port.
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: AdapterFailure) -> FollowPersistenceError {
    match failure {
        AdapterFailure::Connection(message) => FollowPersistenceError::connection(message),
        AdapterFailure::Query(message) => FollowPersistenceError::query(message),
    }
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn create(&self, user: &UserId, author: &UserId) -> Result<(), FollowPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        diesel::insert_into(follows::table)
            .values(NewFollowRow {
                user_id: user.as_uuid(),
                author_id: author.as_uuid(),
                created_at: Utc::now(),
            })
            .on_conflict((follows::user_id, follows::author_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(())
    }

    async fn delete(&self, user: &UserId, author: &UserId) -> Result<(), FollowPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        diesel::delete(follows::table.find((user.as_uuid(), author.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(())
    }

    async fn exists(
        &self,
        user: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        diesel::select(diesel::dsl::exists(
            follows::table.find((user.as_uuid(), author.as_uuid())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|e| map_failure(classify_diesel_error(e)))
    }

    async fn authors_followed_by(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, FollowPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let ids: Vec<Uuid> = follows::table
            .filter(follows::user_id.eq(user.as_uuid()))
            .select(follows::author_id)
            .load::<Uuid>(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }
}
