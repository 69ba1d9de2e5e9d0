//! Request validation helpers shared by the HTTP handlers.
//!
//! Every validation failure becomes an `invalid_request` error whose details
//! carry `{ "field": ..., "code": ... }`.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{
    CourseId, CourseValidationError, Error, LoginValidationError, RegistrationValidationError,
    UserValidationError,
};

/// Limit applied to listing endpoints when the query omits one.
pub const DEFAULT_LISTING_LIMIT: usize = 4;
/// Largest accepted listing limit.
pub const MAX_LISTING_LIMIT: usize = 50;

pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Unwrap a body field that must be present.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, Error> {
    value.ok_or_else(|| {
        field_error(field, "missing_field", format!("missing required field: {field}"))
    })
}

fn user_reason(err: &UserValidationError) -> &'static str {
    match err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyUsername => "empty_username",
        UserValidationError::UsernameTooShort { .. } => "username_too_short",
        UserValidationError::UsernameTooLong { .. } => "username_too_long",
        UserValidationError::UsernameInvalidCharacters => "username_invalid_characters",
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::InvalidEmail => "invalid_email",
        UserValidationError::UnknownRole(_) => "unknown_role",
    }
}

pub(crate) fn registration_error(err: RegistrationValidationError) -> Error {
    let code = match &err {
        RegistrationValidationError::Username(inner) | RegistrationValidationError::Email(inner) => {
            user_reason(inner)
        }
        RegistrationValidationError::EmptyPassword => "empty_password",
        RegistrationValidationError::PasswordTooShort { .. } => "password_too_short",
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn login_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyIdentifier => ("identifier", "empty_identifier"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn course_error(err: CourseValidationError) -> Error {
    field_error(err.field(), err.reason(), err.to_string())
}

/// Parse a course id from a path segment. Anything that is not a positive
/// integer names no course, so it is reported as `not_found`.
pub(crate) fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    raw.parse::<CourseId>().map_err(|_| Error::not_found("course not found"))
}

/// Resolve an optional `limit` query value into `1..=MAX_LISTING_LIMIT`.
pub(crate) fn listing_limit(limit: Option<usize>) -> Result<usize, Error> {
    match limit {
        None => Ok(DEFAULT_LISTING_LIMIT),
        Some(value) if (1..=MAX_LISTING_LIMIT).contains(&value) => Ok(value),
        Some(_) => Err(field_error(
            "limit",
            "invalid_limit",
            format!("limit must be between 1 and {MAX_LISTING_LIMIT}"),
        )),
    }
}

/// Report malformed JSON bodies in the shared error format.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        other => format!("invalid JSON body: {other}"),
    };
    field_error("body", "invalid_json", message).into()
}

/// Report malformed query strings in the shared error format.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    field_error("query", "invalid_query", format!("invalid query string: {err}")).into()
}

/// Extractor configuration wiring the handlers above.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}
