//! Tests for account handlers.

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::domain::ports::MockLoginService;
use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{
    MEMBER_ID, SESSION_COOKIE, api_test_app, login_cookie, seeded_service, session_cookie,
};

fn seeded_state() -> HttpState {
    HttpState::from_service(seeded_service())
}

async fn json_body(res: ServiceResponse) -> Value {
    let body = actix_test::read_body(res).await;
    serde_json::from_slice(&body).expect("JSON body")
}

fn post(uri: &str, body: Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request()
}

#[rstest]
#[case("chung@coursehub.com")]
#[case("ChungHo")]
#[case("chungho")]
#[actix_web::test]
async fn login_accepts_email_or_username(#[case] identifier: &str) {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;

    let res = actix_test::call_service(
        &app,
        post(
            "/api/login",
            json!({ "identifier": identifier, "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie");
    assert_eq!(cookie.name(), SESSION_COOKIE);
    assert!(cookie.http_only().unwrap_or(true));

    let body = json_body(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], MEMBER_ID);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn wrong_password_is_unauthorised_without_cookie() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;

    let res = actix_test::call_service(
        &app,
        post(
            "/api/login",
            json!({ "identifier": "ChungHo", "password": "wrong-password" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
    let body = json_body(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "invalid credentials");
}

#[rstest]
#[case(json!({ "password": "x" }), "identifier", "missing_field")]
#[case(json!({ "identifier": "ChungHo" }), "password", "missing_field")]
#[case(json!({ "identifier": "   ", "password": "x" }), "identifier", "empty_identifier")]
#[case(json!({ "identifier": "ChungHo", "password": "" }), "password", "empty_password")]
#[actix_web::test]
async fn login_validation_reports_field(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut login = MockLoginService::new();
    login.expect_authenticate().never();
    let state = HttpState {
        login: Arc::new(login),
        ..seeded_state()
    };
    let app = actix_test::init_service(api_test_app(state)).await;

    let res = actix_test::call_service(&app, post("/api/login", body)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err = json_body(res).await;
    assert_eq!(err["code"], "invalid_request");
    assert_eq!(err["details"]["field"], field);
    assert_eq!(err["details"]["code"], code);
}

#[actix_web::test]
async fn login_passes_trimmed_identifier_to_service() {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .withf(|credentials: &LoginCredentials| credentials.identifier() == "ChungHo")
        .times(1)
        .return_once(|_| Err(Error::unauthorized("invalid credentials")));
    let state = HttpState {
        login: Arc::new(login),
        ..seeded_state()
    };
    let app = actix_test::init_service(api_test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        post(
            "/api/login",
            json!({ "identifier": "  ChungHo ", "password": "pw" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn registered_member_can_log_in() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;

    let res = actix_test::call_service(
        &app,
        post(
            "/api/register",
            json!({ "username": "NewStudent", "email": "new@x.com", "password": "secret1" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(res).await["message"],
        "Registration successful, please log in"
    );

    let cookie = login_cookie(&app, ("newstudent", "secret1")).await;
    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let me = json_body(me).await;
    assert_eq!(me["username"], "NewStudent");
    assert_eq!(me["role"], "MEMBER");
}

#[rstest]
#[case(json!({ "username": "Other", "email": "chung@coursehub.com", "password": "secret1" }), "email", "email_taken")]
#[case(json!({ "username": "chungho", "email": "fresh@x.com", "password": "secret1" }), "username", "username_taken")]
#[case(json!({ "username": "ChungHo", "email": "chung@coursehub.com", "password": "secret1" }), "email", "email_taken")]
#[actix_web::test]
async fn duplicate_registration_conflicts(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;

    let res = actix_test::call_service(&app, post("/api/register", body)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err = json_body(res).await;
    assert_eq!(err["code"], "conflict");
    assert_eq!(err["details"]["field"], field);
    assert_eq!(err["details"]["code"], code);
}

#[rstest]
#[case(json!({ "email": "a@x.com", "password": "secret1" }), "username")]
#[case(json!({ "username": "Someone", "email": "not-an-email", "password": "secret1" }), "email")]
#[case(json!({ "username": "Someone", "email": "a@x.com", "password": "123" }), "password")]
#[actix_web::test]
async fn invalid_registration_is_rejected(#[case] body: Value, #[case] field: &str) {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;

    let res = actix_test::call_service(&app, post("/api/register", body)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["details"]["field"], field);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;
    let cookie = login_cookie(&app, ("ChungHo", "password123")).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let removal = session_cookie(&res).expect("removal cookie");
    assert_eq!(removal.value(), "");

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/users/me")
            .cookie(removal)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}
