use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateSessionRequest, UpdateSessionRequest};
use crate::domain::models::session::EventSession;
use crate::domain::services::freshness::Resource;
use crate::error::AppError;
use chrono::NaiveTime;
use std::sync::Arc;
use tracing::info;

fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.session_repo.list_by_event(&event_id).await?;
    Ok(Json(sessions))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if payload.total_seats < 1 {
        return Err(AppError::Validation("Total seats must be at least 1".into()));
    }

    let time = parse_time(&payload.time)?;
    let session = EventSession::new(event.id.clone(), time, payload.total_seats);

    let created = state.session_repo.create(&session).await?;
    state.freshness.invalidate(Resource::Event(event.id));

    info!("Session created: {} at {} ({} seats)", created.id, created.time, created.total_seats);
    Ok(Json(created))
}

pub async fn update_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(session_id): Path<String>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    if let Some(time) = payload.time {
        session.time = parse_time(&time)?;
    }

    if let Some(total_seats) = payload.total_seats {
        if total_seats < 1 {
            return Err(AppError::Validation("Total seats must be at least 1".into()));
        }
        // Capacity is immutable once reservations exist; shrinking under a
        // live booking would break the availability invariant.
        if state.reservation_repo.exists_for_session(&session.id).await? {
            return Err(AppError::Conflict(
                "Cannot change capacity of a session with reservations".into(),
            ));
        }
        session.available_seats += total_seats - session.total_seats;
        session.total_seats = total_seats;
    }

    let updated = state.session_repo.update(&session).await?;
    state.freshness.invalidate(Resource::Event(updated.event_id.clone()));

    info!("Session updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_repo.find_by_id(&session_id).await?
        .ok_or(AppError::NotFound("Session not found".into()))?;

    // Check-then-refuse delete-guard: the administrator must cancel or
    // reassign the referencing reservations first.
    if state.reservation_repo.exists_for_session(&session.id).await? {
        return Err(AppError::Conflict(
            "Session has reservations; cancel or reassign them first".into(),
        ));
    }

    state.session_repo.delete(&session.id).await?;
    state.freshness.invalidate(Resource::Event(session.event_id.clone()));

    info!("Session deleted: {}", session.id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
