#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use serde_json::{json, Value};

use common::{auth_header, token_request, TestContext, PASSWORD, STAFF_EMAIL};

#[actix_web::test]
async fn test_admin_requires_token() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/admin/users").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_forbidden_for_regular_user() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.app()).await;
    let token = signup!(app, "cook@example.com");

    let req = TestRequest::get()
        .uri("/admin/users")
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_staff_lists_and_creates_users() {
    let ctx = TestContext::new().with_staff().await;
    let app = test::init_service(ctx.app()).await;
    let staff = login!(app, STAFF_EMAIL);
    signup!(app, "cook@example.com");

    let req = TestRequest::post()
        .uri("/admin/users")
        .insert_header(auth_header(&staff))
        .set_json(json!({ "email": "helper@example.com", "password": PASSWORD, "is_staff": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["is_staff"], true);
    assert_eq!(created["is_superuser"], false);

    let req = TestRequest::get()
        .uri("/admin/users")
        .insert_header(auth_header(&staff))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let emails: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec![STAFF_EMAIL, "cook@example.com", "helper@example.com"]);
    assert!(body[0].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_deactivated_user_loses_access() {
    let ctx = TestContext::new().with_staff().await;
    let app = test::init_service(ctx.app()).await;
    let staff = login!(app, STAFF_EMAIL);
    let token = signup!(app, "cook@example.com");

    let me: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/user/me").insert_header(auth_header(&token)).to_request(),
    )
    .await;
    let uri = format!("/admin/users/{}", me["id"].as_str().unwrap());

    let req = TestRequest::patch()
        .uri(&uri)
        .insert_header(auth_header(&staff))
        .set_json(json!({ "is_active": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_active"], false);

    // 기존 토큰은 거부되고 새 토큰도 발급되지 않음
    let req = TestRequest::get().uri("/user/me").insert_header(auth_header(&token)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, token_request("cook@example.com", PASSWORD).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = TestRequest::get().uri(&uri).insert_header(auth_header(&staff)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["email"], "cook@example.com");
}

#[actix_web::test]
async fn test_admin_unknown_user_is_not_found() {
    let ctx = TestContext::new().with_staff().await;
    let app = test::init_service(ctx.app()).await;
    let staff = login!(app, STAFF_EMAIL);

    for id in ["000000000000000000000000", "garbage"] {
        let req = TestRequest::get()
            .uri(&format!("/admin/users/{}", id))
            .insert_header(auth_header(&staff))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
