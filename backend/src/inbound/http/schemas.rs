//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers below mirror their
//! wire shape so the document can reference them by their domain names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing data, e.g. a taken email.
    #[schema(rename = "conflict")]
    Conflict,
    /// The backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title is required")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level details such as `{ "field": "email", "code": "email_taken" }`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    /// Default role granted at registration.
    #[schema(rename = "MEMBER")]
    Member,
    /// Moderator.
    #[schema(rename = "SUB_ADMIN")]
    SubAdmin,
    /// Full authority.
    #[schema(rename = "ADMIN")]
    Admin,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Credentials never appear in this payload.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "0b7f3c1e-5a2d-4c8e-9f10-000000000003")]
    id: String,
    #[schema(example = "ChungHo")]
    username: String,
    #[schema(example = "chung@coursehub.com")]
    email: String,
    role: RoleSchema,
}

/// OpenAPI schema for [`crate::domain::Course`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Course)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseSchema {
    /// Creation timestamp in milliseconds, bumped to stay unique.
    #[schema(example = 1_700_000_000_000_u64)]
    id: u64,
    #[schema(rename = "ownerId", example = "0b7f3c1e-5a2d-4c8e-9f10-000000000003")]
    owner_id: String,
    /// Owner's username when the course was uploaded.
    #[schema(rename = "ownerUsername", example = "ChungHo")]
    owner_username: String,
    /// Owner's role when the course was uploaded; later promotions do not
    /// change it.
    #[schema(rename = "ownerRole")]
    owner_role: RoleSchema,
    #[schema(example = "Rust for beginners")]
    title: String,
    #[schema(example = "ChungHo")]
    author: String,
    views: u64,
    #[schema(example = "Programming")]
    category: String,
    icon: String,
    #[schema(example = "https://doc.rust-lang.org/book/")]
    link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn schema_names_follow_domain_paths() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert_eq!(UserSchema::name(), "crate.domain.User");
        assert_eq!(RoleSchema::name(), "crate.domain.Role");
        assert_eq!(CourseSchema::name(), "crate.domain.Course");
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("forbidden")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_variant(#[case] variant: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(variant));
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn user_schema_has_no_password() {
        let schema_json = schema_to_json::<UserSchema>();
        assert!(schema_json.contains("username"));
        assert!(!schema_json.to_lowercase().contains("password"));
    }

    #[test]
    fn course_schema_carries_owner_snapshot() {
        let schema_json = schema_to_json::<CourseSchema>();
        for field in ["ownerId", "ownerUsername", "ownerRole", "views", "link"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
