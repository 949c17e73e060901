mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn setup_event_with_session(app: &TestApp, admin: &AuthHeaders, seats: i32) -> (String, String) {
    let event_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Dinner",
                "description": ".",
                "date": "2026-12-31",
                "is_open": true
            }).to_string())).unwrap()
    ).await.unwrap();
    let event = parse_body(event_res).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let session_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/events/{}/sessions", event_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "time": "20:00", "total_seats": seats }).to_string())).unwrap()
    ).await.unwrap();
    let session = parse_body(session_res).await;
    let session_id = session["id"].as_str().unwrap().to_string();

    (event_id, session_id)
}

#[tokio::test]
async fn test_session_starts_fully_available() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000001").await;
    let (event_id, _) = setup_event_with_session(&app, &admin, 12).await;

    let list_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}/sessions", event_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let sessions = parse_body(list_res).await;
    assert_eq!(sessions[0]["total_seats"], 12);
    assert_eq!(sessions[0]["available_seats"], 12);
}

#[tokio::test]
async fn test_session_rejects_zero_seats() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000001").await;
    let (event_id, _) = setup_event_with_session(&app, &admin, 5).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/events/{}/sessions", event_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "time": "21:00", "total_seats": 0 }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_delete_guard() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000001").await;
    let (event_id, session_id) = setup_event_with_session(&app, &admin, 10).await;

    // Book a table against the session.
    let booking = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/reservations")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "event_id": event_id,
                "session_id": session_id,
                "number_of_seats": 2,
                "contact_name": "Admin",
                "phone_number": "3330000001"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(booking.status(), StatusCode::OK);
    let reservation = parse_body(booking).await;

    // Deleting a session with reservations is refused.
    let blocked = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/sessions/{}", session_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(blocked.status(), StatusCode::CONFLICT);

    // Even a cancelled reservation still references the session.
    let cancel = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/reservations/{}/cancel", reservation["id"].as_str().unwrap()))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(cancel.status(), StatusCode::OK);

    let still_blocked = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/sessions/{}", session_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(still_blocked.status(), StatusCode::CONFLICT);

    // After the reservation row itself is removed, the delete goes through.
    let remove = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/reservations/{}", reservation["id"].as_str().unwrap()))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(remove.status(), StatusCode::OK);

    let ok = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/sessions/{}", session_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_capacity_locked_with_reservations() {
    let app = TestApp::new().await;
    let admin = app.signup("admin@example.com", "password123", "Admin", "3330000001").await;
    let (event_id, session_id) = setup_event_with_session(&app, &admin, 10).await;

    // Resizing an empty session adjusts availability with it.
    let grow = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/sessions/{}", session_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "total_seats": 14 }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(grow.status(), StatusCode::OK);
    let grown = parse_body(grow).await;
    assert_eq!(grown["total_seats"], 14);
    assert_eq!(grown["available_seats"], 14);

    let booking = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/reservations")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "event_id": event_id,
                "session_id": session_id,
                "number_of_seats": 3,
                "contact_name": "Admin",
                "phone_number": "3330000001"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(booking.status(), StatusCode::OK);

    // With a live booking, capacity changes are refused.
    let locked = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/sessions/{}", session_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "total_seats": 20 }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(locked.status(), StatusCode::CONFLICT);

    // Changing just the time still works.
    let retime = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/sessions/{}", session_id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "time": "21:30" }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(retime.status(), StatusCode::OK);
}
