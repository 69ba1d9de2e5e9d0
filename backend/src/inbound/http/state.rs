//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so they can be tested against mocks without any storage.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCommand, CoursesQuery, LoginService, RegistrationService, UserAdminCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub user_admin: Arc<dyn UserAdminCommand>,
    pub courses: Arc<dyn CoursesQuery>,
    pub course_commands: Arc<dyn CourseCommand>,
}

impl HttpState {
    /// Point every port at one service implementing all of them.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use coursehub::domain::{Directory, DirectoryService, PasswordHasher};
    /// use coursehub::inbound::http::state::HttpState;
    /// use coursehub::outbound::persistence::InMemoryDirectoryRepository;
    ///
    /// let service = Arc::new(DirectoryService::new(
    ///     Directory::new(),
    ///     Arc::new(InMemoryDirectoryRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    ///     PasswordHasher::default(),
    /// ));
    /// let state = HttpState::from_service(service);
    /// let _users = state.users.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: LoginService
            + RegistrationService
            + UsersQuery
            + UserAdminCommand
            + CoursesQuery
            + CourseCommand
            + 'static,
    {
        Self {
            login: service.clone(),
            registration: service.clone(),
            users: service.clone(),
            user_admin: service.clone(),
            courses: service.clone(),
            course_commands: service,
        }
    }
}
