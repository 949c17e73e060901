use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::auth::Claims;
use crate::domain::services::auth_service::TOKEN_AUDIENCE;
use std::sync::Arc;
use tower_cookies::Cookies;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use tracing::Span;

/// Identity proven by the access-token cookie. The explicit context object
/// every gated handler receives; there is no ambient current-user state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub is_admin: bool,
}

pub struct AuthUser(pub AuthContext);

/// Same as [`AuthUser`] but additionally requires the admin claim.
pub struct AdminUser(pub AuthContext);

fn decode_context<S>(parts: &mut Parts, state: &S) -> Result<AuthContext, StatusCode>
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    let cookies = parts.extensions.get::<Cookies>()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let access_token = cookies.get("access_token")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .value()
        .to_string();

    let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

    let decoding_key = DecodingKey::from_ed_pem(app_state.config.jwt_public_key.as_bytes())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_audience(&[TOKEN_AUDIENCE]);

    let token_data = decode::<Claims>(&access_token, &decoding_key, &validation)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let method = &parts.method;
    if method != "GET" && method != "HEAD" && method != "OPTIONS" {
        let csrf_header_val = parts.headers.get("X-CSRF-Token")
            .ok_or(StatusCode::FORBIDDEN)?
            .to_str()
            .map_err(|_| StatusCode::FORBIDDEN)?;

        if csrf_header_val != token_data.claims.csrf_token {
            return Err(StatusCode::FORBIDDEN);
        }
    }

    let context = AuthContext {
        user_id: token_data.claims.sub,
        is_admin: token_data.claims.is_admin,
    };

    Span::current().record("user_id", &context.user_id);

    Ok(context)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        decode_context(parts, state).map(AuthUser)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = decode_context(parts, state)?;
        if !context.is_admin {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(AdminUser(context))
    }
}
