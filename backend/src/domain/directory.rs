//! The directory aggregate: every user keyed by email plus the ordered list
//! of courses.
//!
//! The aggregate is plain data. Serialising access to it and persisting it
//! is the job of [`DirectoryService`](super::DirectoryService).

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::{Course, CourseId, Email, PasswordHash, Registration, User, UserId};

impl Borrow<str> for Email {
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

/// A user together with their stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    user: User,
    password: PasswordHash,
}

impl UserRecord {
    /// Pair a user with an already hashed credential.
    pub fn new(user: User, password: PasswordHash) -> Self {
        Self { user, password }
    }

    /// Credential-free view of the user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored credential.
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub(crate) fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }
}

/// Reason a registration collides with an existing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationConflict {
    /// Another account already uses the email.
    EmailTaken,
    /// Another account already uses the username, ignoring case.
    UsernameTaken,
}

/// Users and courses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    users: BTreeMap<Email, UserRecord>,
    courses: Vec<Course>,
}

impl Directory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a directory from persisted parts. A later record with the same
    /// email replaces an earlier one.
    pub fn from_parts(
        users: impl IntoIterator<Item = UserRecord>,
        courses: impl IntoIterator<Item = Course>,
    ) -> Self {
        let users = users
            .into_iter()
            .map(|record| (record.user().email().clone(), record))
            .collect();
        Self {
            users,
            courses: courses.into_iter().collect(),
        }
    }

    /// Stored user records, ordered by email.
    pub fn user_records(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    /// Credential-free users, ordered by email.
    pub fn users(&self) -> Vec<User> {
        self.users.values().map(|record| record.user().clone()).collect()
    }

    /// Look a user up by identifier.
    pub fn find_user_by_id(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.values().find(|record| record.user().id() == id)
    }

    pub(crate) fn find_user_by_id_mut(&mut self, id: &UserId) -> Option<&mut UserRecord> {
        self.users
            .values_mut()
            .find(|record| record.user().id() == id)
    }

    /// Resolve a login identifier: exact email key first, then a
    /// case-insensitive scan over usernames.
    pub fn find_by_email_or_username(&self, identifier: &str) -> Option<&UserRecord> {
        self.users.get(identifier).or_else(|| {
            self.users
                .values()
                .find(|record| record.user().username().matches_ignore_case(identifier))
        })
    }

    /// Check that a registration collides with nobody. Email is checked
    /// first.
    pub fn check_registration(&self, registration: &Registration) -> Result<(), RegistrationConflict> {
        if self.users.contains_key(registration.email().as_ref()) {
            return Err(RegistrationConflict::EmailTaken);
        }
        let username = registration.username().as_ref();
        if self
            .users
            .values()
            .any(|record| record.user().username().matches_ignore_case(username))
        {
            return Err(RegistrationConflict::UsernameTaken);
        }
        Ok(())
    }

    pub(crate) fn insert_user(&mut self, record: UserRecord) {
        self.users.insert(record.user().email().clone(), record);
    }

    /// Courses in upload order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Look a course up by identifier.
    pub fn find_course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    /// Largest course identifier in use.
    pub fn newest_course_id(&self) -> Option<CourseId> {
        self.courses.iter().map(Course::id).max()
    }

    /// Up to `limit` courses, newest first.
    pub fn recent_courses(&self, limit: usize) -> Vec<Course> {
        let mut courses = self.courses.clone();
        courses.sort_by_key(|course| Reverse(course.id()));
        courses.truncate(limit);
        courses
    }

    /// Up to `limit` courses by view count, newest first among equals.
    pub fn popular_courses(&self, limit: usize) -> Vec<Course> {
        let mut courses = self.courses.clone();
        courses.sort_by_key(|course| Reverse((course.views(), course.id())));
        courses.truncate(limit);
        courses
    }

    pub(crate) fn push_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub(crate) fn remove_course(&mut self, id: CourseId) -> Option<Course> {
        let index = self.courses.iter().position(|course| course.id() == id)?;
        Some(self.courses.remove(index))
    }
}
