mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/health")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_first_signup_becomes_admin() {
    let app = TestApp::new().await;

    // First profile bootstraps the admin.
    let res1 = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/signup")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "owner@example.com",
                "password": "password123",
                "full_name": "Owner",
                "phone_number": "333 000 0001"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res1.status(), StatusCode::CREATED);
    let body1 = parse_body(res1).await;
    assert_eq!(body1["user"]["is_admin"], true);

    // Everyone after that is a regular guest.
    let res2 = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/signup")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "guest@example.com",
                "password": "password123",
                "full_name": "Guest One",
                "phone_number": "333 000 0002"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res2.status(), StatusCode::CREATED);
    let body2 = parse_body(res2).await;
    assert_eq!(body2["user"]["is_admin"], false);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.signup("dup@example.com", "password123", "First", "3330000001").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/signup")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "dup@example.com",
                "password": "password123",
                "full_name": "Second",
                "phone_number": "3330000002"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new().await;

    let bad_email = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/signup")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "not-an-email",
                "password": "password123",
                "full_name": "X",
                "phone_number": "1"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let short_password = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/signup")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "ok@example.com",
                "password": "short",
                "full_name": "X",
                "phone_number": "1"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = TestApp::new().await;
    app.signup("user@example.com", "password123", "User", "3330000001").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "user@example.com",
                "password": "wrong-password"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let app = TestApp::new().await;

    let anon = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(anon.status(), StatusCode::UNAUTHORIZED);

    let auth = app.signup("me@example.com", "password123", "Me Myself", "3330000001").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/me")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["full_name"], "Me Myself");
}

#[tokio::test]
async fn test_mutation_without_csrf_is_forbidden() {
    let app = TestApp::new().await;
    let auth = app.signup("admin@example.com", "password123", "Admin", "3330000001").await;

    // POST with a valid cookie but no X-CSRF-Token header.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Dinner",
                "description": "A dinner",
                "date": "2026-12-31"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Same request with the header passes.
    let ok = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Dinner",
                "description": "A dinner",
                "date": "2026-12-31"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_credentials_requires_current_password() {
    let app = TestApp::new().await;
    let auth = app.signup("cred@example.com", "password123", "Cred", "3330000001").await;

    let wrong = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/auth/credentials")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "current_password": "nope",
                "new_password": "newpassword1"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let ok = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/auth/credentials")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "current_password": "password123",
                "new_password": "newpassword1"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    // Old password no longer works, new one does.
    let old_login = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "cred@example.com",
                "password": "password123"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    app.login("cred@example.com", "newpassword1").await;
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = TestApp::new().await;
    app.signup("rot@example.com", "password123", "Rot", "3330000001").await;

    // Log in again to get a clean refresh cookie for this flow.
    let login_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "rot@example.com",
                "password": "password123"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(login_res.status(), StatusCode::OK);

    let cookies: Vec<String> = login_res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .collect();
    let refresh_cookie = cookies.iter()
        .find(|c| c.starts_with("refresh_token="))
        .expect("No refresh_token cookie");
    let refresh_value: String = refresh_cookie
        .trim_start_matches("refresh_token=")
        .split(';').next().unwrap().to_string();

    let refresh_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_value))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(refresh_res.status(), StatusCode::OK);
    let body = parse_body(refresh_res).await;
    assert!(body["csrf_token"].as_str().is_some());

    // The consumed refresh token is gone; replaying it is rejected.
    let replay = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/refresh")
            .header(header::COOKIE, format!("refresh_token={}", refresh_value))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}
