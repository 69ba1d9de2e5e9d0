//! Account handlers: sign-up, login and logout.
//!
//! ```text
//! POST /api/register {"username":"ChungHo","email":"chung@coursehub.com","password":"password123"}
//! POST /api/login {"identifier":"ChungHo","password":"password123"}
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_error, registration_error, required};

/// Sign-up form for `POST /api/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ChungHo")]
    pub username: Option<String>,
    #[schema(example = "chung@coursehub.com")]
    pub email: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
}

impl RegisterRequest {
    fn into_registration(self) -> ApiResult<Registration> {
        let username = required(self.username, "username")?;
        let email = required(self.email, "email")?;
        let password = zeroize::Zeroizing::new(required(self.password, "password")?);
        Registration::try_from_parts(&username, &email, &password).map_err(registration_error)
    }
}

/// Login request body for `POST /api/login`.
///
/// `identifier` is matched against emails exactly, then usernames ignoring
/// case.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "chung@coursehub.com")]
    pub identifier: Option<String>,
    #[schema(example = "password123")]
    pub password: Option<String>,
}

impl LoginRequest {
    fn into_credentials(self) -> ApiResult<LoginCredentials> {
        let identifier = required(self.identifier, "identifier")?;
        let password = zeroize::Zeroizing::new(required(self.password, "password")?);
        LoginCredentials::try_from_parts(&identifier, &password).map_err(login_error)
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// The authenticated user, without credentials.
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Create a member account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Email or username already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = payload.into_inner().into_registration()?;
    state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new(
        "Registration successful, please log in",
    )))
}

/// Authenticate and establish a session.
///
/// The session cookie carries only the user id; roles are always read from
/// the directory.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing identifier or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = payload.into_inner().into_credentials()?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(LoginResponse {
        success: true,
        user,
    }))
}

/// End the session. Succeeds whether or not one exists.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    debug!("session cleared");
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
