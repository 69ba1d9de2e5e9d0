//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports are implemented by [`DirectoryService`](super::DirectoryService)
//! and called by inbound adapters. [`DirectoryRepository`] is the single
//! driven port, implemented by the outbound persistence adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod courses_query;
mod directory_repository;
mod login_service;
mod registration_service;
mod user_admin_command;
mod users_query;

pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use courses_query::CoursesQuery;
#[cfg(test)]
pub use courses_query::MockCoursesQuery;
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
pub use directory_repository::{DirectoryPersistenceError, DirectoryRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_admin_command::MockUserAdminCommand;
pub use user_admin_command::UserAdminCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
