//! Driving port for account sign-up.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Sign-up use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a member account.
    ///
    /// Fails with `conflict` when the email is taken, then when the username
    /// is taken ignoring case.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
