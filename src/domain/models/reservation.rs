use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::services::seat_ledger::ReservationStatus;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub session_id: String,
    pub number_of_seats: i32,
    pub status: String,
    pub contact_name: String,
    pub phone_number: String,
    pub allergy_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub user_id: String,
    pub event_id: String,
    pub session_id: String,
    pub number_of_seats: i32,
    pub contact_name: String,
    pub phone_number: String,
    pub allergy_notes: Option<String>,
}

impl Reservation {
    /// Bookings are confirmed immediately. The pending status exists in the
    /// model and stays reachable through admin edits.
    pub fn new(params: NewReservationParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            event_id: params.event_id,
            session_id: params.session_id,
            number_of_seats: params.number_of_seats,
            status: ReservationStatus::Confirmed.as_str().to_string(),
            contact_name: params.contact_name,
            phone_number: params.phone_number,
            allergy_notes: params.allergy_notes,
            created_at: Utc::now(),
        }
    }
}

/// Admin listing shape: the reservation decorated with the owner's display
/// name (a placeholder when the profile lookup fails).
#[derive(Debug, Serialize, Clone)]
pub struct ReservationWithGuest {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub guest_name: String,
}
