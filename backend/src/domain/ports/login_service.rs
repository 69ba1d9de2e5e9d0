//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to check credentials without knowing how the
//! directory is stored, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown identifiers and wrong passwords both yield `unauthorized`
    /// with the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
