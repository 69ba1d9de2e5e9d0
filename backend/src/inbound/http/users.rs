//! Users API handlers.
//!
//! ```text
//! GET /api/users
//! GET /api/users/me
//! PUT /api/users/{id}/promote
//! ```

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, get, put, web};
use serde::Serialize;
use tracing::info;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response body for `PUT /api/users/{id}/promote`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PromoteResponse {
    #[schema(example = "Promoted ChungHo to sub-admin")]
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// List every registered user. Credentials are never included.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users ordered by email", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Return the user bound to the current session.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let user = state.users.current_user(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![
            CacheDirective::Private,
            CacheDirective::NoCache,
        ]))
        .json(user))
}

/// Promote a member to sub-admin. Only admins may promote.
#[utoipa::path(
    put,
    path = "/api/users/{id}/promote",
    params(("id" = String, Path, description = "Identifier of the member to promote")),
    responses(
        (status = 200, description = "Member promoted", body = PromoteResponse),
        (status = 400, description = "User not eligible", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Actor is not an admin", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "promoteUser"
)]
#[put("/users/{id}/promote")]
pub async fn promote_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PromoteResponse>> {
    let actor = session.require_user_id()?;
    let target = path.into_inner();
    let user = state.user_admin.promote_user(&actor, &target).await?;
    info!(actor = %actor, target = %user.id(), "promotion request served");
    Ok(web::Json(PromoteResponse {
        message: format!("Promoted {} to sub-admin", user.username()),
        user,
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
