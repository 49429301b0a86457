//! Write-path service for follow edges.
//!
//! [`FollowCommandService`] implements the [`FollowCommand`] driving port.
//! Both operations resolve the target by username, then delegate idempotent
//! edge maintenance to the repository; self-follow requests are dropped
//! before touching storage.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::feed_service::{map_follow_error, map_user_error};
use crate::domain::ports::{FollowCommand, FollowRepository, UserRepository};
use crate::domain::user::{User, UserId, Username};

/// Follow/unfollow write path over the repository ports.
#[derive(Clone)]
pub struct FollowCommandService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl FollowCommandService {
    /// Assemble the service over its repositories.
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    async fn resolve_author(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl FollowCommand for FollowCommandService {
    async fn follow(&self, user: &UserId, author: &Username) -> Result<(), Error> {
        let author = self.resolve_author(author).await?;
        if author.id == *user {
            // Self-follow is a no-op, not an error.
            return Ok(());
        }
        self.follows
            .create(user, &author.id)
            .await
            .map_err(map_follow_error)
    }

    async fn unfollow(&self, user: &UserId, author: &Username) -> Result<(), Error> {
        let author = self.resolve_author(author).await?;
        self.follows
            .delete(user, &author.id)
            .await
            .map_err(map_follow_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockFollowRepository, MockUserRepository};

    fn service(users: MockUserRepository, follows: MockFollowRepository) -> FollowCommandService {
        FollowCommandService::new(Arc::new(users), Arc::new(follows))
    }

    fn ada() -> User {
        User::register(Username::new("ada").expect("valid username"))
    }

    #[tokio::test]
    async fn self_follow_touches_no_storage() {
        let mut users = MockUserRepository::new();
        let target = ada();
        let target_id = target.id;
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(target.clone())));
        let mut follows = MockFollowRepository::new();
        follows.expect_create().times(0);

        let username = Username::new("ada").expect("valid username");
        service(users, follows)
            .follow(&target_id, &username)
            .await
            .expect("no-op");
    }

    #[tokio::test]
    async fn following_someone_else_creates_the_edge() {
        let mut users = MockUserRepository::new();
        let target = ada();
        let target_id = target.id;
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(target.clone())));
        let mut follows = MockFollowRepository::new();
        follows
            .expect_create()
            .withf(move |_, author| *author == target_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let follower = UserId::random();
        let username = Username::new("ada").expect("valid username");
        service(users, follows)
            .follow(&follower, &username)
            .await
            .expect("edge created");
    }

    #[tokio::test]
    async fn unfollow_delegates_deletion() {
        let mut users = MockUserRepository::new();
        let target = ada();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(target.clone())));
        let mut follows = MockFollowRepository::new();
        follows.expect_delete().times(1).returning(|_, _| Ok(()));

        let follower = UserId::random();
        let username = Username::new("ada").expect("valid username");
        service(users, follows)
            .unfollow(&follower, &username)
            .await
            .expect("edge removed");
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        let follows = MockFollowRepository::new();

        let follower = UserId::random();
        let username = Username::new("ghost").expect("valid username");
        let error = service(users, follows)
            .follow(&follower, &username)
            .await
            .expect_err("missing target");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
