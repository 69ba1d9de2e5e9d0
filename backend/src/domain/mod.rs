//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, the access policy deciding who may delete or promote, and the
//! directory service that implements the driving ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - User, Course: client-visible entities; neither carries credentials.
//! - Directory: users keyed by email plus courses, the persisted aggregate.
//! - DirectoryService: implementation of every port in [`ports`].

pub mod access_policy;
pub mod auth;
pub mod course;
pub mod directory;
pub mod directory_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod seed;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::course::{
    Course, CourseId, CourseValidationError, DEFAULT_COURSE_ICON, NewCourse, OwnerSnapshot,
};
pub use self::directory::{Directory, RegistrationConflict, UserRecord};
pub use self::directory_service::{DirectoryService, SeedPolicy};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::{PasswordHash, PasswordHashError, PasswordHasher};
pub use self::trace_id::TraceId;
pub use self::user::{
    Email, Role, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use coursehub::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
