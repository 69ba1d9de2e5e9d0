//! Directory service implementing every driving port.
//!
//! All state lives in one [`Directory`] behind a `tokio` mutex. Mutations
//! clone the directory, apply the change to the clone, persist it through the
//! [`DirectoryRepository`] and only then swap it in. A failed save therefore
//! leaves both the store and the in-memory state untouched.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::sync::{Mutex, OnceCell};
use tracing::{error, info, warn};
use zeroize::Zeroizing;

use super::access_policy::{Actor, can_delete_course, can_promote};
use super::directory::RegistrationConflict;
use super::ports::{
    CourseCommand, CoursesQuery, DirectoryPersistenceError, DirectoryRepository, LoginService,
    RegistrationService, UserAdminCommand, UsersQuery,
};
use super::seed::seed_directory;
use super::{
    Course, CourseId, Directory, Error, LoginCredentials, NewCourse, OwnerSnapshot, PasswordHash,
    PasswordHasher, Registration, Role, User, UserId, UserRecord,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const DECOY_PASSWORD: &str = "coursehub-decoy-credential";

/// What to do when the repository holds no snapshot yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Persist the starter accounts.
    Seed,
    /// Start from an empty directory and save nothing until the first
    /// mutation.
    Empty,
}

/// Directory-backed implementation of the driving ports.
pub struct DirectoryService<R> {
    state: Mutex<Directory>,
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
    // Checked when a login names no account.
    decoy: OnceCell<PasswordHash>,
}

impl<R> DirectoryService<R> {
    /// Wrap an already loaded directory.
    pub fn new(
        directory: Directory,
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            state: Mutex::new(directory),
            repository,
            clock,
            hasher,
            decoy: OnceCell::new(),
        }
    }

    async fn snapshot<T>(&self, read: impl FnOnce(&Directory) -> T) -> T {
        let guard = self.state.lock().await;
        read(&guard)
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = self.hasher;
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn decoy_hash(&self) -> Result<PasswordHash, Error> {
        self.decoy
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD))
            .await
            .cloned()
    }
}

fn map_persistence_error(err: DirectoryPersistenceError) -> Error {
    error!(error = %err, "directory persistence failed");
    match err {
        DirectoryPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("directory store unavailable: {message}"))
        }
        DirectoryPersistenceError::Io { message } => {
            Error::internal(format!("directory store error: {message}"))
        }
        DirectoryPersistenceError::Serialization { message } => {
            Error::internal(format!("directory snapshot serialization failed: {message}"))
        }
    }
}

fn actor_role(directory: &Directory, actor: &UserId) -> Result<Role, Error> {
    directory
        .find_user_by_id(actor)
        .map(|record| record.user().role())
        .ok_or_else(|| Error::unauthorized("session user no longer exists"))
}

impl<R> DirectoryService<R>
where
    R: DirectoryRepository,
{
    /// Load the directory from `repository`, seeding it first when nothing
    /// has been stored and `seed` allows it.
    pub async fn open(
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        hasher: PasswordHasher,
        seed: SeedPolicy,
    ) -> Result<Self, Error> {
        let loaded = repository.load().await.map_err(map_persistence_error)?;
        let directory = match (loaded, seed) {
            (Some(directory), _) => directory,
            (None, SeedPolicy::Empty) => Directory::new(),
            (None, SeedPolicy::Seed) => {
                let directory = tokio::task::spawn_blocking(move || seed_directory(&hasher))
                    .await
                    .map_err(|err| Error::internal(format!("seeding task failed: {err}")))??;
                repository
                    .save(&directory)
                    .await
                    .map_err(map_persistence_error)?;
                info!(users = directory.users().len(), "seeded empty directory");
                directory
            }
        };
        Ok(Self::new(directory, repository, clock, hasher))
    }

    /// Apply `change` to a copy of the directory, persist the copy and then
    /// commit it. Nothing is committed when `change` or the save fails.
    async fn mutate<T, F>(&self, change: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Directory) -> Result<T, Error> + Send,
        T: Send,
    {
        let mut guard = self.state.lock().await;
        let mut draft = guard.clone();
        let value = change(&mut draft)?;
        self.repository
            .save(&draft)
            .await
            .map_err(map_persistence_error)?;
        *guard = draft;
        Ok(value)
    }

    fn now_millis(&self) -> u64 {
        u64::try_from(self.clock.utc().timestamp_millis()).unwrap_or_default()
    }
}

#[async_trait]
impl<R> UsersQuery for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.snapshot(Directory::users).await)
    }

    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.snapshot(|directory| {
            directory
                .find_user_by_id(id)
                .map(|record| record.user().clone())
        })
        .await
        .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<R> CoursesQuery for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(self
            .snapshot(|directory| directory.courses().to_vec())
            .await)
    }

    async fn recent_courses(&self, limit: usize) -> Result<Vec<Course>, Error> {
        Ok(self
            .snapshot(|directory| directory.recent_courses(limit))
            .await)
    }

    async fn popular_courses(&self, limit: usize) -> Result<Vec<Course>, Error> {
        Ok(self
            .snapshot(|directory| directory.popular_courses(limit))
            .await)
    }
}

#[async_trait]
impl<R> CourseCommand for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn upload_course(&self, actor: &UserId, course: NewCourse) -> Result<Course, Error> {
        let now = self.now_millis();
        let created = self
            .mutate(|directory| {
                let owner = directory
                    .find_user_by_id(actor)
                    .map(UserRecord::user)
                    .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;
                let snapshot = OwnerSnapshot {
                    id: owner.id().clone(),
                    username: owner.username().clone(),
                    role: owner.role(),
                };
                let id = CourseId::next(now, directory.newest_course_id());
                let created = Course::create(id, snapshot, course);
                directory.push_course(created.clone());
                Ok(created)
            })
            .await?;
        info!(
            course_id = %created.id(),
            owner_id = %created.owner_id(),
            "course uploaded"
        );
        Ok(created)
    }

    async fn delete_course(&self, actor: &UserId, id: CourseId) -> Result<Course, Error> {
        let removed = self
            .mutate(|directory| {
                let role = actor_role(directory, actor)?;
                let course = directory
                    .find_course(id)
                    .ok_or_else(|| Error::not_found("course not found"))?;
                if !can_delete_course(Actor { id: actor, role }, course) {
                    warn!(course_id = %id, actor_id = %actor, role = %role, "course deletion denied");
                    return Err(Error::forbidden("not allowed to delete this course"));
                }
                directory
                    .remove_course(id)
                    .ok_or_else(|| Error::not_found("course not found"))
            })
            .await?;
        info!(course_id = %id, actor_id = %actor, "course deleted");
        Ok(removed)
    }
}

#[async_trait]
impl<R> UserAdminCommand for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn promote_user(&self, actor: &UserId, target: &str) -> Result<User, Error> {
        let promoted = self
            .mutate(|directory| {
                let role = actor_role(directory, actor)?;
                if role != Role::Admin {
                    warn!(actor_id = %actor, role = %role, "promotion denied");
                    return Err(Error::forbidden("only admins may promote users"));
                }
                let record = match UserId::new(target) {
                    Ok(id) => directory.find_user_by_id_mut(&id),
                    Err(_) => None,
                }
                .ok_or_else(|| Error::not_found("user not found"))?;
                let target_role = record.user().role();
                if !can_promote(role, target_role) || !record.user_mut().promote_to_sub_admin() {
                    return Err(Error::invalid_request("user cannot be promoted").with_details(
                        json!({ "field": "role", "code": "not_eligible", "role": target_role }),
                    ));
                }
                Ok(record.user().clone())
            })
            .await?;
        info!(actor_id = %actor, user_id = %promoted.id(), "user promoted to sub-admin");
        Ok(promoted)
    }
}

fn registration_conflict(conflict: RegistrationConflict) -> Error {
    match conflict {
        RegistrationConflict::EmailTaken => Error::conflict("email is already registered")
            .with_details(json!({ "field": "email", "code": "email_taken" })),
        RegistrationConflict::UsernameTaken => Error::conflict("username is already taken")
            .with_details(json!({ "field": "username", "code": "username_taken" })),
    }
}

#[async_trait]
impl<R> RegistrationService for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        // Fail fast before paying for the hash; re-checked under the lock.
        self.snapshot(|directory| directory.check_registration(registration))
            .await
            .map_err(registration_conflict)?;

        let password = self.hash_password(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            Role::Member,
        );
        let created = self
            .mutate(|directory| {
                directory
                    .check_registration(registration)
                    .map_err(registration_conflict)?;
                directory.insert_user(UserRecord::new(user.clone(), password));
                Ok(user)
            })
            .await?;
        info!(user_id = %created.id(), "user registered");
        Ok(created)
    }
}

#[async_trait]
impl<R> LoginService for DirectoryService<R>
where
    R: DirectoryRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .snapshot(|directory| {
                directory
                    .find_by_email_or_username(credentials.identifier())
                    .cloned()
            })
            .await;
        let (hash, user) = match found {
            Some(record) => (record.password().clone(), Some(record.user().clone())),
            None => (self.decoy_hash().await?, None),
        };

        let password = Zeroizing::new(credentials.password().to_owned());
        let verified = tokio::task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?;
        match user {
            Some(user) if verified => Ok(user),
            Some(user) => {
                warn!(user_id = %user.id(), "login failed: wrong password");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
            None => {
                warn!("login failed: unknown identifier");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
