use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, SignupRequest, UpdateCredentialsRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::auth::{AuthResponse, UserSummary};
use crate::domain::models::profile::Profile;
use crate::domain::services::reservation_service::normalize_phone;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::info;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !payload.email.contains('@') {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }
    if payload.full_name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }

    if state.profile_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("An account with this email already exists".into()));
    }

    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    // Bootstrap rule: the very first profile becomes the admin. The
    // count-then-insert window is a documented limitation; admin bootstrap
    // is a one-time deployment event.
    let is_admin = state.profile_repo.count().await? == 0;

    let profile = Profile::new(
        payload.email,
        password_hash,
        payload.full_name,
        normalize_phone(&payload.phone_number),
        is_admin,
    );
    let created = state.profile_repo.create(&profile).await?;

    let (access_jwt, refresh_token, csrf_token) = state.auth_service.login(&created).await?;
    set_cookies(&cookies, &access_jwt, &refresh_token);
    state.freshness.on_sign_in(&created.id);

    info!("User signed up: {} (admin: {})", created.id, created.is_admin);

    Ok((StatusCode::CREATED, Json(AuthResponse {
        csrf_token,
        user: summary(&created),
    })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profile_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&profile.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let (access_jwt, refresh_token, csrf_token) = state.auth_service.login(&profile).await?;

    set_cookies(&cookies, &access_jwt, &refresh_token);
    state.freshness.on_sign_in(&profile.id);

    info!("User logged in: {}", profile.id);

    Ok(Json(AuthResponse {
        csrf_token,
        user: summary(&profile),
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let refresh_cookie = cookies.get("refresh_token").ok_or(AppError::Unauthorized)?;
    let raw_token = refresh_cookie.value();

    let token_hash = state.auth_service.hash_token(raw_token);
    let record = state.auth_repo.find_refresh_token(&token_hash).await?
        .ok_or(AppError::Unauthorized)?;

    let profile = state.profile_repo.find_by_id(&record.user_id).await?
        .ok_or(AppError::Unauthorized)?;

    let (new_access, new_refresh, new_csrf) = state.auth_service.refresh(raw_token, &profile).await?;

    set_cookies(&cookies, &new_access, &new_refresh);

    info!("Token refreshed for user: {}", profile.id);

    Ok(Json(AuthResponse {
        csrf_token: new_csrf,
        user: summary(&profile),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get("refresh_token") {
        let _ = state.auth_service.logout(cookie.value()).await;
    }

    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    cookies.remove(Cookie::build(("refresh_token", "")).path("/").into());

    // Sign-out clears every cached entry, with no automatic refetch.
    state.freshness.on_sign_out();

    info!("User logged out");

    Ok(StatusCode::OK)
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(context): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profile_repo.find_by_id(&context.user_id).await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(summary(&profile)))
}

pub async fn update_credentials(
    State(state): State<Arc<AppState>>,
    AuthUser(context): AuthUser,
    Json(payload): Json<UpdateCredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut profile = state.profile_repo.find_by_id(&context.user_id).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&profile.password_hash)
        .map_err(|_| AppError::Internal)?;
    Argon2::default().verify_password(payload.current_password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    if let Some(email) = payload.email {
        if !email.contains('@') {
            return Err(AppError::Validation("Invalid email address".into()));
        }
        profile.email = email;
    }

    if let Some(new_password) = payload.new_password {
        if new_password.len() < 8 {
            return Err(AppError::Validation("Password must be at least 8 characters".into()));
        }
        let salt = SaltString::generate(&mut rand::thread_rng());
        profile.password_hash = Argon2::default()
            .hash_password(new_password.as_bytes(), &salt)
            .map_err(|_| AppError::Internal)?
            .to_string();
    }

    let updated = state.profile_repo.update(&profile).await?;
    info!("Credentials updated for user: {}", updated.id);
    Ok(Json(summary(&updated)))
}

fn summary(profile: &Profile) -> UserSummary {
    UserSummary {
        id: profile.id.clone(),
        email: profile.email.clone(),
        full_name: profile.full_name.clone(),
        is_admin: profile.is_admin,
    }
}

fn set_cookies(cookies: &Cookies, access: &str, refresh: &str) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(15));
    cookies.add(access_c);

    let mut refresh_c = Cookie::new("refresh_token", refresh.to_string());
    refresh_c.set_http_only(true);
    refresh_c.set_secure(true);
    refresh_c.set_same_site(SameSite::Strict);
    refresh_c.set_path("/");
    refresh_c.set_max_age(Duration::days(7));
    cookies.add(refresh_c);
}
