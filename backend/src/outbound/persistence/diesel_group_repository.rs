//! PostgreSQL-backed `GroupRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GroupPersistenceError, GroupRepository};
use crate::domain::{Group, GroupId, GroupSlug};

use super::diesel_helpers::{AdapterFailure, classify_diesel_error, classify_pool_error};
use super::models::{GroupRow, NewGroupRow};
use super::pool::DbPool;
use super::schema::groups;

/// Diesel-backed implementation of the `GroupRepository` port.
#[derive(Clone)]
pub struct DieselGroupRepository {
    pool: DbPool,
}

impl DieselGroupRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: AdapterFailure) -> GroupPersistenceError {
    match failure {
        AdapterFailure::Connection(message) => GroupPersistenceError::connection(message),
        AdapterFailure::Query(message) => GroupPersistenceError::query(message),
    }
}

#[async_trait]
impl GroupRepository for DieselGroupRepository {
    async fn insert(&self, group: &Group) -> Result<(), GroupPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        diesel::insert_into(groups::table)
            .values(NewGroupRow {
                id: group.id.as_uuid(),
                title: &group.title,
                slug: group.slug.as_str(),
                description: &group.description,
                created_at: group.created_at,
            })
            .execute(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        Ok(())
    }

    async fn find_by_slug(
        &self,
        slug: &GroupSlug,
    ) -> Result<Option<Group>, GroupPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let row = groups::table
            .filter(groups::slug.eq(slug.as_str()))
            .select(GroupRow::as_select())
            .first::<GroupRow>(&mut conn)
            .await
            .optional()
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        row.map(GroupRow::into_domain)
            .transpose()
            .map_err(GroupPersistenceError::query)
    }

    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, GroupPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let row = groups::table
            .find(id.as_uuid())
            .select(GroupRow::as_select())
            .first::<GroupRow>(&mut conn)
            .await
            .optional()
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        row.map(GroupRow::into_domain)
            .transpose()
            .map_err(GroupPersistenceError::query)
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_failure(classify_pool_error(e)))?;
        let rows = groups::table
            .order(groups::title.asc())
            .select(GroupRow::as_select())
            .load::<GroupRow>(&mut conn)
            .await
            .map_err(|e| map_failure(classify_diesel_error(e)))?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(GroupPersistenceError::query))
            .collect()
    }
}
