use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::models::settings::{ClockWidgetStyle, HowItWorksStep};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateCredentialsRequest {
    pub current_password: String,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub is_open: Option<bool>,
    pub opening_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub max_reservations_per_user: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_open: Option<bool>,
    pub opening_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub max_reservations_per_user: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    /// Time of day, "HH:MM".
    pub time: String,
    pub total_seats: i32,
}

#[derive(Deserialize)]
pub struct UpdateSessionRequest {
    pub time: Option<String>,
    pub total_seats: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub event_id: String,
    pub session_id: String,
    pub number_of_seats: i32,
    pub contact_name: String,
    pub phone_number: String,
    pub allergy_notes: Option<String>,
    /// Admin-only: bypasses the open-flag and one-per-event checks.
    #[serde(default)]
    pub admin_override: bool,
}

#[derive(Deserialize)]
pub struct UpdateReservationRequest {
    pub number_of_seats: Option<i32>,
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub allergy_notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePlaceholderRequest {
    pub key: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub tagline_text: String,
    pub how_it_works_title: String,
    pub how_it_works_description: String,
    pub how_it_works_steps: Vec<HowItWorksStep>,
    pub clock_widget: ClockWidgetStyle,
}

#[derive(Deserialize)]
pub struct UpdateProfileAdminRequest {
    pub is_admin: bool,
}
