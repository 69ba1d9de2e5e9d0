//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler, the health probes, the schema
//! wrappers for domain types and the session cookie security scheme. Swagger
//! UI serves it in debug builds; `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::inbound::http::courses::UploadCourseRequest;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::{
    CourseSchema, ErrorCodeSchema, ErrorSchema, RoleSchema, UserSchema,
};
use crate::inbound::http::users::PromoteResponse;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CourseHub backend API",
        description = "Course sharing: accounts, uploads and moderation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::promote_user,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::recent_courses,
        crate::inbound::http::courses::popular_courses,
        crate::inbound::http::courses::upload_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        RoleSchema,
        CourseSchema,
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        PromoteResponse,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        UploadCourseRequest
    )),
    tags(
        (name = "auth", description = "Sign-up and session management"),
        (name = "users", description = "User listing and promotion"),
        (name = "courses", description = "Course listing, upload and deletion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
