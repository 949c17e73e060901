pub mod postgres_auth_repo;
pub mod postgres_event_repo;
pub mod postgres_profile_repo;
pub mod postgres_reservation_repo;
pub mod postgres_session_repo;
pub mod postgres_settings_repo;
pub mod postgres_template_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_event_repo;
pub mod sqlite_profile_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_session_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_template_repo;
