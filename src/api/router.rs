use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, cache, event, health, profile, reservation, session, settings, template};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/auth/credentials", put(auth::update_credentials))

        // Events & sessions
        .route("/api/v1/events", get(event::list_events).post(event::create_event))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/sessions", get(session::list_sessions).post(session::create_session))
        .route("/api/v1/sessions/{session_id}", put(session::update_session).delete(session::delete_session))

        // Reservations
        .route("/api/v1/reservations", post(reservation::create_reservation).get(reservation::list_all_reservations))
        .route("/api/v1/reservations/my", get(reservation::list_my_reservations))
        .route("/api/v1/reservations/{reservation_id}/cancel", post(reservation::cancel_reservation))
        .route("/api/v1/reservations/{reservation_id}", put(reservation::update_reservation).delete(reservation::delete_reservation))
        .route("/api/v1/events/{event_id}/reservations", get(reservation::list_event_reservations))

        // Message templates & placeholders
        .route("/api/v1/templates", get(template::list_templates).post(template::create_template))
        .route("/api/v1/templates/{template_id}", get(template::get_template).put(template::update_template).delete(template::delete_template))
        .route("/api/v1/templates/{template_id}/preview", post(template::preview_template))
        .route("/api/v1/placeholders", get(template::list_placeholders).post(template::create_placeholder))
        .route("/api/v1/placeholders/{key}", delete(template::delete_placeholder))

        // Site settings
        .route("/api/v1/settings", get(settings::get_settings).put(settings::update_settings))

        // Profiles (admin console)
        .route("/api/v1/profiles", get(profile::list_profiles))
        .route("/api/v1/profiles/{profile_id}", put(profile::update_profile_role).delete(profile::delete_profile))

        // Cache control
        .route("/api/v1/cache/refresh", post(cache::refresh_cache))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
