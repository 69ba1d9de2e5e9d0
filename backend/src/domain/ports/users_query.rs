//! Driving port for user-facing queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read access to the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, without credentials.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user behind a session. Not found when the account is gone.
    async fn current_user(&self, id: &UserId) -> Result<User, Error>;
}
