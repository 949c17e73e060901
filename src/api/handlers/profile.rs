use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::UpdateProfileAdminRequest;
use crate::domain::models::auth::UserSummary;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let profiles = state.profile_repo.list().await?;
    let summaries: Vec<UserSummary> = profiles.iter().map(|p| UserSummary {
        id: p.id.clone(),
        email: p.email.clone(),
        full_name: p.full_name.clone(),
        is_admin: p.is_admin,
    }).collect();
    Ok(Json(summaries))
}

pub async fn update_profile_role(
    State(state): State<Arc<AppState>>,
    AdminUser(context): AdminUser,
    Path(profile_id): Path<String>,
    Json(payload): Json<UpdateProfileAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    // An admin cannot demote themselves; that would risk locking every
    // admin out of the instance.
    if profile_id == context.user_id && !payload.is_admin {
        return Err(AppError::Conflict("Cannot revoke your own admin role".into()));
    }

    let mut profile = state.profile_repo.find_by_id(&profile_id).await?
        .ok_or(AppError::NotFound("Profile not found".into()))?;

    profile.is_admin = payload.is_admin;
    let updated = state.profile_repo.update(&profile).await?;

    info!("Profile role updated: {} (admin: {})", updated.id, updated.is_admin);
    Ok(Json(UserSummary {
        id: updated.id,
        email: updated.email,
        full_name: updated.full_name,
        is_admin: updated.is_admin,
    }))
}

pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    AdminUser(context): AdminUser,
    Path(profile_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if profile_id == context.user_id {
        return Err(AppError::Conflict("Cannot delete your own account".into()));
    }

    state.profile_repo.find_by_id(&profile_id).await?
        .ok_or(AppError::NotFound("Profile not found".into()))?;

    // Reservation rows reference the profile; they must be removed first.
    if !state.reservation_repo.list_by_user(&profile_id).await?.is_empty() {
        return Err(AppError::Conflict(
            "Profile has reservations; delete or reassign them first".into(),
        ));
    }

    state.profile_repo.delete(&profile_id).await?;
    info!("Profile deleted: {}", profile_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
