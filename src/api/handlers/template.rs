use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AdminUser;
use crate::api::dtos::requests::{CreatePlaceholderRequest, CreateTemplateRequest, UpdateTemplateRequest};
use crate::api::dtos::responses::RenderedTemplateResponse;
use crate::domain::models::template::{MessageTemplate, TemplatePlaceholder};
use crate::domain::services::placeholders;
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let templates = state.template_repo.list().await?;
    Ok(Json(templates))
}

pub async fn get_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let template = state.template_repo.find_by_id(&template_id).await?
        .ok_or(AppError::NotFound("Template not found".into()))?;
    Ok(Json(template))
}

pub async fn create_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Template name is required".into()));
    }

    let template = MessageTemplate::new(payload.name, payload.content);
    let created = state.template_repo.create(&template).await?;

    info!("Template created: {} ({})", created.id, created.name);
    Ok(Json(created))
}

pub async fn update_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(template_id): Path<String>,
    Json(payload): Json<UpdateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut template = state.template_repo.find_by_id(&template_id).await?
        .ok_or(AppError::NotFound("Template not found".into()))?;

    if let Some(name) = payload.name { template.name = name; }
    if let Some(content) = payload.content { template.content = content; }

    let updated = state.template_repo.update(&template).await?;
    info!("Template updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.template_repo.delete(&template_id).await?;
    info!("Template deleted: {}", template_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// Renders a template body against a JSON context, e.g. for the admin
/// message preview before a deep link is composed client-side.
pub async fn preview_template(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(template_id): Path<String>,
    Json(context): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let template = state.template_repo.find_by_id(&template_id).await?
        .ok_or(AppError::NotFound("Template not found".into()))?;

    let rendered = placeholders::render(&template.content, &context);
    Ok(Json(RenderedTemplateResponse {
        template_id: template.id,
        rendered,
    }))
}

pub async fn list_placeholders(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = state.template_repo.list_placeholders().await?;
    Ok(Json(entries))
}

pub async fn create_placeholder(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreatePlaceholderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let key = payload.key.trim().to_string();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation("Placeholder key must be alphanumeric".into()));
    }
    if state.template_repo.find_placeholder(&key).await?.is_some() {
        return Err(AppError::Conflict("Placeholder already exists".into()));
    }

    let placeholder = TemplatePlaceholder::custom(key, payload.description.unwrap_or_default());
    let created = state.template_repo.create_placeholder(&placeholder).await?;

    info!("Placeholder created: {}", created.key);
    Ok(Json(created))
}

pub async fn delete_placeholder(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let placeholder = state.template_repo.find_placeholder(&key).await?
        .ok_or(AppError::NotFound("Placeholder not found".into()))?;

    // The built-in tokens templates rely on are never removable.
    if placeholder.protected || placeholders::is_default_placeholder(&placeholder.key) {
        return Err(AppError::Conflict("Default placeholders cannot be removed".into()));
    }

    state.template_repo.delete_placeholder(&key).await?;
    info!("Placeholder deleted: {}", key);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
