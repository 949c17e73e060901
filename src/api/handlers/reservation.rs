use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::api::dtos::requests::{CreateReservationRequest, UpdateReservationRequest};
use crate::domain::services::reservation_service::{CreateReservationParams, ReservationUpdate};
use crate::error::AppError;
use std::str::FromStr;
use std::sync::Arc;

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(context): AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin_override = payload.admin_override && context.is_admin;

    let created = state.reservations.create(
        &context.user_id,
        CreateReservationParams {
            event_id: payload.event_id,
            session_id: payload.session_id,
            number_of_seats: payload.number_of_seats,
            contact_name: payload.contact_name,
            phone_number: payload.phone_number,
            allergy_notes: payload.allergy_notes,
        },
        admin_override,
    ).await?;

    Ok(Json(created))
}

pub async fn list_my_reservations(
    State(state): State<Arc<AppState>>,
    AuthUser(context): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservations.list_for_user(&context.user_id).await?;
    Ok(Json(reservations))
}

pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(context): AuthUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.reservations
        .cancel(&reservation_id, &context.user_id, context.is_admin)
        .await?;
    Ok(Json(cancelled))
}

pub async fn list_event_reservations(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservations.list_by_event(&event_id).await?;
    Ok(Json(reservations))
}

pub async fn list_all_reservations(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservations.list_all().await?;
    Ok(Json(reservations))
}

pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(reservation_id): Path<String>,
    Json(payload): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = payload.status
        .map(|s| crate::domain::services::seat_ledger::ReservationStatus::from_str(&s))
        .transpose()?;

    let updated = state.reservations.edit(&reservation_id, ReservationUpdate {
        number_of_seats: payload.number_of_seats,
        contact_name: payload.contact_name,
        phone_number: payload.phone_number,
        allergy_notes: payload.allergy_notes,
        status,
    }).await?;

    Ok(Json(updated))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(reservation_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.reservations.delete(&reservation_id).await?;
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
