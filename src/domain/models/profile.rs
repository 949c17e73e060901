use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub phone_number: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(email: String, password_hash: String, full_name: String, phone_number: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            full_name,
            phone_number,
            is_admin,
            created_at: Utc::now(),
        }
    }
}
