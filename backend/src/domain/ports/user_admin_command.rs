//! Driving port for administrative user changes.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Role management use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdminCommand: Send + Sync {
    /// Promote the user whose id is `target` from member to sub-admin on
    /// behalf of `actor`.
    ///
    /// `target` is the raw id taken from the request; a malformed id names no
    /// user. Errors, in evaluation order: `forbidden` when the actor is not an
    /// admin, `not_found` for an unknown target, `invalid_request` when the
    /// target is not a member.
    async fn promote_user(&self, actor: &UserId, target: &str) -> Result<User, Error>;
}
