//! Driving port for session establishment.
//!
//! Credential verification is an external collaborator's concern; this port
//! hands back the user record whose id the session should carry.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::User;

/// Resolves verified credentials to a user record.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify `credentials` and return the user to bind to the session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
