//! Tests for users API handlers.

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::Error;
use crate::domain::ports::MockUserAdminCommand;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::{
    ADMIN_LOGIN, MEMBER_ID, MEMBER_LOGIN, SUB_ADMIN_ID, SUB_ADMIN_LOGIN, api_test_app,
    login_cookie, seeded_service,
};

fn seeded_state() -> HttpState {
    HttpState::from_service(seeded_service())
}

async fn json_body(res: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(res).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[actix_web::test]
async fn list_users_is_public_and_omits_credentials() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    let emails: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user.get("email").and_then(Value::as_str))
        .collect();
    assert_eq!(
        emails,
        [
            "admin@coursehub.com",
            "chung@coursehub.com",
            "subadmin@coursehub.com"
        ]
    );
    let raw = body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("passwordHash"));
}

#[actix_web::test]
async fn current_user_requires_a_session() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users/me").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["code"], "unauthorized");
}

#[actix_web::test]
async fn current_user_returns_session_user_privately() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;
    let cookie = login_cookie(&app, MEMBER_LOGIN).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cache = res
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(cache.contains("private"), "cache-control was {cache}");

    let body = json_body(res).await;
    assert_eq!(body["id"], MEMBER_ID);
    assert_eq!(body["role"], "MEMBER");
}

#[actix_web::test]
async fn admin_promotes_member_once() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;
    let cookie = login_cookie(&app, ADMIN_LOGIN).await;
    let uri = format!("/api/users/{MEMBER_ID}/promote");

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["user"]["role"], "SUB_ADMIN");
    assert_eq!(body["message"], "Promoted ChungHo to sub-admin");

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    let body = json_body(again).await;
    assert_eq!(body["details"]["code"], "not_eligible");
}

#[rstest]
#[case(SUB_ADMIN_LOGIN, MEMBER_ID, StatusCode::FORBIDDEN)]
#[case(MEMBER_LOGIN, SUB_ADMIN_ID, StatusCode::FORBIDDEN)]
#[case(ADMIN_LOGIN, SUB_ADMIN_ID, StatusCode::BAD_REQUEST)]
#[case(ADMIN_LOGIN, "0b7f3c1e-5a2d-4c8e-9f10-0000000000ff", StatusCode::NOT_FOUND)]
#[case(ADMIN_LOGIN, "user01", StatusCode::NOT_FOUND)]
#[case(MEMBER_LOGIN, "user01", StatusCode::FORBIDDEN)]
#[case(SUB_ADMIN_LOGIN, "not-a-uuid", StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn promotion_failures_map_to_status(
    #[case] login: (&str, &str),
    #[case] target: &str,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;
    let cookie = login_cookie(&app, login).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{target}/promote"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn promotion_without_session_is_unauthorised() {
    let app = actix_test::init_service(api_test_app(seeded_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{MEMBER_ID}/promote"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn unavailable_store_surfaces_as_503() {
    let mut admin = MockUserAdminCommand::new();
    admin
        .expect_promote_user()
        .times(1)
        .return_once(|_, _| Err(Error::service_unavailable("directory store unavailable")));
    let state = HttpState {
        user_admin: Arc::new(admin),
        ..seeded_state()
    };
    let app = actix_test::init_service(api_test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_LOGIN).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{MEMBER_ID}/promote"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(res.headers().contains_key("trace-id"));
    assert_eq!(json_body(res).await["code"], "service_unavailable");
}
