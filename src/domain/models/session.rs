use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventSession {
    pub id: String,
    pub event_id: String,
    pub time: NaiveTime,
    pub total_seats: i32,
    /// Stored counter. Must always equal total_seats minus the seats held by
    /// active reservations referencing this session.
    pub available_seats: i32,
    pub created_at: DateTime<Utc>,
}

impl EventSession {
    pub fn new(event_id: String, time: NaiveTime, total_seats: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            time,
            total_seats,
            available_seats: total_seats,
            created_at: Utc::now(),
        }
    }
}
