//! Driving port for course mutations.
//!
//! The actor is always the session user. Adapters never pass an owner or role
//! taken from the request body; the implementation reads both from the
//! directory.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error, NewCourse, UserId};

/// Course upload and deletion use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create a course owned by `actor`.
    ///
    /// Fails with `unauthorized` when the actor no longer exists.
    async fn upload_course(&self, actor: &UserId, course: NewCourse) -> Result<Course, Error>;

    /// Delete a course on behalf of `actor`, returning the removed course.
    ///
    /// A missing course is `not_found` regardless of who asks; a denied
    /// deletion is `forbidden`.
    async fn delete_course(&self, actor: &UserId, id: CourseId) -> Result<Course, Error>;
}
