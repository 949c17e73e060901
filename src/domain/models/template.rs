use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Free-text message template with `{tokenName}` placeholders, managed by
/// administrators.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MessageTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl MessageTemplate {
    pub fn new(name: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Registry entry for a placeholder token. Protected entries are the built-in
/// defaults and can never be deleted.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TemplatePlaceholder {
    pub key: String,
    pub description: String,
    pub protected: bool,
    pub created_at: DateTime<Utc>,
}

impl TemplatePlaceholder {
    pub fn custom(key: String, description: String) -> Self {
        Self {
            key,
            description,
            protected: false,
            created_at: Utc::now(),
        }
    }
}
