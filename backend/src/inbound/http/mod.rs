//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod courses;
pub mod error;
pub mod health;
pub mod responses;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` handler on `cfg`.
///
/// Fixed course paths are registered ahead of `/courses/{id}`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use coursehub::inbound::http::api_services;
///
/// let _app = App::new().service(web::scope("/api").configure(api_services));
/// ```
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::promote_user)
        .service(courses::list_courses)
        .service(courses::recent_courses)
        .service(courses::popular_courses)
        .service(courses::upload_course)
        .service(courses::delete_course);
}
