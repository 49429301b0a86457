//! Login service resolving credentials to user records.
//!
//! Credential verification is an external collaborator's concern; this
//! implementation keeps the delegating contract visible by accepting any
//! well-formed pair and resolving (or registering) the named user through
//! the user repository, so the rest of the system always sees a stored
//! record behind the session id.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::feed_service::map_user_error;
use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::user::User;

/// Login service backed by the user directory.
#[derive(Clone)]
pub struct DirectoryLoginService {
    users: Arc<dyn UserRepository>,
}

impl DirectoryLoginService {
    /// Assemble the service over the user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for DirectoryLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.users
            .resolve_or_register(credentials.username())
            .await
            .map_err(map_user_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureStore;

    #[tokio::test]
    async fn login_registers_first_time_users() {
        let store = Arc::new(FixtureStore::new());
        let service = DirectoryLoginService::new(store);
        let creds = LoginCredentials::try_from_parts("ada", "pw").expect("valid");

        let first = service.login(&creds).await.expect("first login");
        let second = service.login(&creds).await.expect("second login");
        assert_eq!(first.id, second.id);
        assert_eq!(first.username.as_str(), "ada");
    }
}
