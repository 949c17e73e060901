use crate::domain::models::{
    auth::RefreshTokenRecord, event::Event, profile::Profile, reservation::Reservation,
    session::EventSession, settings::SiteSettings, template::{MessageTemplate, TemplatePlaceholder},
};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    /// Ordered by date ascending.
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &EventSession) -> Result<EventSession, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventSession>, AppError>;
    /// Ordered by time-of-day ascending.
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventSession>, AppError>;
    async fn update(&self, session: &EventSession) -> Result<EventSession, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts the row and applies the seat decrement against the session in
    /// one transaction. Fails with Conflict when the session cannot hold the
    /// requested seats, leaving availability untouched.
    async fn create_holding_seats(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    /// Writes the updated row and applies `seat_delta` to the session's
    /// availability in one transaction (positive delta = seats newly
    /// committed).
    async fn update_adjusting_seats(&self, reservation: &Reservation, seat_delta: i32) -> Result<Reservation, AppError>;
    /// Hard-deletes the row, releasing `seats_to_release` back to the
    /// session in the same transaction.
    async fn delete_releasing_seats(&self, id: &str, session_id: &str, seats_to_release: i32) -> Result<(), AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn find_active_for_user_event(&self, user_id: &str, event_id: &str) -> Result<Option<Reservation>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_all(&self) -> Result<Vec<Reservation>, AppError>;
    /// Delete-guard support: does any reservation still reference the session?
    async fn exists_for_session(&self, session_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn list(&self) -> Result<Vec<Profile>, AppError>;
    async fn update(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MessageTemplate>, AppError>;
    async fn list(&self) -> Result<Vec<MessageTemplate>, AppError>;
    async fn update(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    async fn list_placeholders(&self) -> Result<Vec<TemplatePlaceholder>, AppError>;
    async fn find_placeholder(&self, key: &str) -> Result<Option<TemplatePlaceholder>, AppError>;
    async fn create_placeholder(&self, placeholder: &TemplatePlaceholder) -> Result<TemplatePlaceholder, AppError>;
    async fn delete_placeholder(&self, key: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self) -> Result<Option<SiteSettings>, AppError>;
    async fn upsert(&self, settings: &SiteSettings) -> Result<SiteSettings, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}
