//! Driving port for course listings.

use async_trait::async_trait;

use crate::domain::{Course, Error};

/// Read access to shared courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesQuery: Send + Sync {
    /// All courses in upload order.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// Up to `limit` courses, newest first.
    async fn recent_courses(&self, limit: usize) -> Result<Vec<Course>, Error>;

    /// Up to `limit` courses by views, newest first among equals.
    async fn popular_courses(&self, limit: usize) -> Result<Vec<Course>, Error>;
}
