use std::sync::Arc;
use crate::domain::ports::{
    AuthRepository, EventRepository, ProfileRepository, ReservationRepository,
    SessionRepository, SettingsRepository, TemplateRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::cache::CacheStore;
use crate::domain::services::catalog::CatalogService;
use crate::domain::services::freshness::FreshnessService;
use crate::domain::services::reservation_service::ReservationService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub template_repo: Arc<dyn TemplateRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<CacheStore>,
    pub freshness: Arc<FreshnessService>,
    pub catalog: Arc<CatalogService>,
    pub reservations: Arc<ReservationService>,
}
