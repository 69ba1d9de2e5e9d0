//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::json;

use crate::Trace;
use crate::domain::seed::seed_directory;
use crate::domain::{DirectoryService, PasswordHasher};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::extractor_config;
use crate::outbound::persistence::InMemoryDirectoryRepository;

pub const SESSION_COOKIE: &str = "session";

pub const ADMIN_ID: &str = "0b7f3c1e-5a2d-4c8e-9f10-000000000001";
pub const SUB_ADMIN_ID: &str = "0b7f3c1e-5a2d-4c8e-9f10-000000000002";
pub const MEMBER_ID: &str = "0b7f3c1e-5a2d-4c8e-9f10-000000000003";

/// Seeded `(identifier, password)` pairs.
pub const ADMIN_LOGIN: (&str, &str) = ("admin@coursehub.com", "adminpassword");
pub const SUB_ADMIN_LOGIN: (&str, &str) = ("subadmin@coursehub.com", "subadminpassword");
pub const MEMBER_LOGIN: (&str, &str) = ("ChungHo", "password123");

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, including removal cookies.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Directory service over memory storage holding the seed accounts.
pub fn seeded_service() -> Arc<DirectoryService<InMemoryDirectoryRepository>> {
    let hasher = PasswordHasher::low_cost();
    let directory = seed_directory(&hasher).expect("seed directory");
    Arc::new(DirectoryService::new(
        directory.clone(),
        Arc::new(InMemoryDirectoryRepository::with_directory(directory)),
        Arc::new(mockable::DefaultClock),
        hasher,
    ))
}

/// Application with every API route, wired to `state`.
pub fn api_test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(extractor_config)
        .wrap(test_session_middleware())
        .wrap(Trace)
        .service(web::scope("/api").configure(super::api_services))
}

/// Log in through `POST /api/login` and return the session cookie.
pub async fn login_cookie<S>(app: &S, (identifier, password): (&str, &str)) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "identifier": identifier, "password": password }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login as {identifier} failed");
    session_cookie(&res).expect("session cookie")
}
