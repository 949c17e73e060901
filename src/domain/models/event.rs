use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::session::EventSession;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    /// Authoritative openness flag. Opening/closing timestamps below are
    /// informational only and never derive this value.
    pub is_open: bool,
    pub opening_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub max_reservations_per_user: i32,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub is_open: bool,
    pub opening_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub max_reservations_per_user: i32,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            date: params.date,
            is_open: params.is_open,
            opening_time: params.opening_time,
            closing_time: params.closing_time,
            max_reservations_per_user: params.max_reservations_per_user,
            created_at: Utc::now(),
        }
    }
}

/// Nested shape served by the catalog read path: the event row plus its
/// sessions ordered by time ascending.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventWithSessions {
    #[serde(flatten)]
    pub event: Event,
    pub sessions: Vec<EventSession>,
}
