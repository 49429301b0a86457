//! Login credential types.
//!
//! Credential verification is delegated to the login port; the domain only
//! enforces the shape of what gets handed to it.

use super::user::{UserValidationError, Username};

/// Validation errors returned by [`LoginCredentials::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username failed shape validation.
    #[error(transparent)]
    InvalidUsername(#[from] UserValidationError),
    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated credential pair submitted to the login port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: String,
}

impl LoginCredentials {
    /// Validate raw credential input.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: password.to_owned(),
        })
    }

    /// The submitted username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The submitted password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_credentials_are_accepted() {
        let creds = LoginCredentials::try_from_parts("ada", "s3cret").expect("valid");
        assert_eq!(creds.username().as_str(), "ada");
        assert_eq!(creds.password(), "s3cret");
    }

    #[test]
    fn empty_password_is_rejected() {
        assert_eq!(
            LoginCredentials::try_from_parts("ada", ""),
            Err(LoginValidationError::EmptyPassword)
        );
    }

    #[test]
    fn malformed_username_is_rejected() {
        assert!(matches!(
            LoginCredentials::try_from_parts("", "pw"),
            Err(LoginValidationError::InvalidUsername(_))
        ));
    }
}
