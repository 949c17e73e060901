use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::UpdateSettingsRequest;
use crate::api::dtos::responses::SettingsResponse;
use crate::domain::models::settings::{SiteSettings, SITE_SETTINGS_ID};
use crate::domain::services::cache::SETTINGS_KEY;
use crate::domain::services::freshness::Resource;
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

const SETTINGS_TTL_MINUTES: i64 = 5;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cached) = state.cache.get::<SiteSettings>(SETTINGS_KEY) {
        return Ok(Json(SettingsResponse::from(cached)));
    }

    // Missing row means the defaults have never been customized.
    let settings = state.settings_repo.get().await?
        .unwrap_or_else(SiteSettings::defaults);

    state.cache.set(SETTINGS_KEY, &settings, SETTINGS_TTL_MINUTES);
    Ok(Json(SettingsResponse::from(settings)))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let settings = SiteSettings {
        id: SITE_SETTINGS_ID.to_string(),
        tagline_text: payload.tagline_text,
        how_it_works_title: payload.how_it_works_title,
        how_it_works_description: payload.how_it_works_description,
        how_it_works_steps: serde_json::to_string(&payload.how_it_works_steps)
            .map_err(|_| AppError::Validation("Invalid how-it-works steps".into()))?,
        clock_widget: serde_json::to_string(&payload.clock_widget)
            .map_err(|_| AppError::Validation("Invalid clock widget style".into()))?,
        updated_at: Utc::now(),
    };

    let saved = state.settings_repo.upsert(&settings).await?;
    state.freshness.invalidate(Resource::Settings);

    info!("Site settings updated");
    Ok(Json(SettingsResponse::from(saved)))
}
