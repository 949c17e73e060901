use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::services::freshness::Resource;
use crate::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct RefreshRequest {
    /// Restrict the refresh to one resource family; omit to drop everything.
    pub resource: Option<String>,
    pub id: Option<String>,
}

/// Manual refresh: drops cached entries so the next read hits the database.
pub async fn refresh_cache(
    State(state): State<Arc<AppState>>,
    AuthUser(context): AuthUser,
    Json(payload): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    let resource = match payload.resource.as_deref() {
        None | Some("all") => Resource::Everything,
        Some("events") => Resource::EventList,
        Some("event") => {
            let id = payload.id
                .ok_or(AppError::Validation("Event id is required".into()))?;
            Resource::Event(id)
        }
        Some("settings") => Resource::Settings,
        Some("my_reservations") => Resource::UserReservations(context.user_id.clone()),
        Some(other) => {
            return Err(AppError::Validation(format!("Unknown resource: {}", other)));
        }
    };

    state.freshness.invalidate(resource);

    info!("Manual cache refresh by user: {}", context.user_id);
    Ok(Json(serde_json::json!({ "status": "refreshed" })))
}
