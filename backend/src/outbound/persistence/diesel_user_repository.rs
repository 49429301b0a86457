//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::diesel_helpers::{AdapterFailure, classify_diesel_error, classify_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: AdapterFailure) -> UserPersistenceError {
    match failure {
        AdapterFailure::Connection(message) => UserPersistenceError::connection(message),
        AdapterFailure::Query(message) => UserPersistenceError::query(message),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn resolve_or_register(
        &self,
        username: &Username,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;

        // Conflict-ignoring insert keeps concurrent first logins for the
        // same username converging on one row.
        let candidate = User::register(username.clone());
        diesel::insert_into(users::table)
            .values(NewUserRow {
                id: candidate.id.as_uuid(),
                username: username.as_str(),
                created_at: candidate.created_at,
            })
            .on_conflict(users::username)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;

        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        row.into_domain().map_err(UserPersistenceError::query)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let row = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        row.map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        row.map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }
}
