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
async fn test_settings_served_with_defaults() {
    let app = TestApp::new().await;

    // Public read, no row written yet.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/settings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["how_it_works_title"], "How it works");
    assert_eq!(body["how_it_works_steps"].as_array().unwrap().len(), 3);
    assert_eq!(body["clock_widget"]["variant"], "analog");
}

#[tokio::test]
async fn test_settings_update_and_invalidation() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000000").await;

    // Prime the cache with defaults.
    app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/settings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let update = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/settings")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "tagline_text": "A new season of dinners",
                "how_it_works_title": "Booking in three steps",
                "how_it_works_description": "Simple and quick.",
                "how_it_works_steps": [
                    { "title": "Choose", "description": "Pick an event." },
                    { "title": "Book", "description": "Reserve your seats." }
                ],
                "clock_widget": {
                    "variant": "digital",
                    "accent_color": "#004d40",
                    "show_seconds": true
                }
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(update.status(), StatusCode::OK);

    // The cached defaults were invalidated by the write.
    let after = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/settings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(after).await;
    assert_eq!(body["tagline_text"], "A new season of dinners");
    assert_eq!(body["how_it_works_steps"].as_array().unwrap().len(), 2);
    assert_eq!(body["clock_widget"]["show_seconds"], true);
}

#[tokio::test]
async fn test_settings_update_requires_admin() {
    let app = TestApp::new().await;
    app.signup("admin@example.com", "password123", "Admin", "3330000000").await;
    let guest = app.signup("guest@example.com", "password123", "Guest", "3330000001").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/settings")
            .header(header::COOKIE, format!("access_token={}", guest.access_token))
            .header("X-CSRF-Token", &guest.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "tagline_text": "x",
                "how_it_works_title": "x",
                "how_it_works_description": "x",
                "how_it_works_steps": [],
                "clock_widget": { "variant": "analog", "accent_color": "#000", "show_seconds": false }
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manual_cache_refresh() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000000").await;

    // Prime the settings cache, then write a new row directly through the
    // repository so the cached copy goes stale.
    app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/settings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let mut settings = reservation_backend::domain::models::settings::SiteSettings::defaults();
    settings.tagline_text = "Changed behind the cache".to_string();
    app.state.settings_repo.upsert(&settings).await.unwrap();

    // Still the cached default.
    let stale = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/settings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(stale).await["tagline_text"], "Book your table for our next event");

    // Manual refresh drops the entry.
    let refresh = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/cache/refresh")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "resource": "settings" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(refresh.status(), StatusCode::OK);

    let fresh = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/settings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(fresh).await["tagline_text"], "Changed behind the cache");
}

#[tokio::test]
async fn test_cache_refresh_rejects_unknown_resource() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000000").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/cache/refresh")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "resource": "bogus" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
