use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::domain::models::event::{Event, NewEventParams};
use crate::domain::services::freshness::Resource;
use crate::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const DEFAULT_MAX_SEATS_PER_USER: i32 = 8;

#[derive(Deserialize)]
pub struct ListEventsQuery {
    /// Opt into the short-TTL cached variant of the list.
    #[serde(default)]
    pub cached: bool,
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEventsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = if query.cached {
        state.catalog.list_events_cached().await?
    } else {
        state.catalog.list_events().await?
    };
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.catalog.get_event(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }

    let event = Event::new(NewEventParams {
        name: payload.name,
        description: payload.description,
        date: payload.date,
        is_open: payload.is_open.unwrap_or(false),
        opening_time: payload.opening_time,
        closing_time: payload.closing_time,
        max_reservations_per_user: payload.max_reservations_per_user.unwrap_or(DEFAULT_MAX_SEATS_PER_USER),
    });

    let created = state.event_repo.create(&event).await?;
    state.freshness.invalidate(Resource::EventList);

    info!("Event created: {} ({})", created.id, created.name);
    Ok(Json(created))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(name) = payload.name { event.name = name; }
    if let Some(description) = payload.description { event.description = description; }
    if let Some(date) = payload.date { event.date = date; }
    if let Some(is_open) = payload.is_open { event.is_open = is_open; }
    if let Some(opening_time) = payload.opening_time { event.opening_time = Some(opening_time); }
    if let Some(closing_time) = payload.closing_time { event.closing_time = Some(closing_time); }
    if let Some(max) = payload.max_reservations_per_user {
        if max < 1 {
            return Err(AppError::Validation("Max seats per user must be at least 1".into()));
        }
        event.max_reservations_per_user = max;
    }

    let updated = state.event_repo.update(&event).await?;
    state.freshness.invalidate(Resource::Event(updated.id.clone()));

    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Sessions carry the delete-guard; an event with guarded sessions fails
    // there first.
    let sessions = state.session_repo.list_by_event(&event_id).await?;
    for session in &sessions {
        if state.reservation_repo.exists_for_session(&session.id).await? {
            return Err(AppError::Conflict(
                "Event has sessions with reservations; cancel or reassign them first".into(),
            ));
        }
    }
    for session in &sessions {
        state.session_repo.delete(&session.id).await?;
    }

    state.event_repo.delete(&event_id).await?;
    state.freshness.invalidate(Resource::Event(event_id.clone()));

    info!("Event deleted: {}", event_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
