use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Fixed id of the singleton row.
pub const SITE_SETTINGS_ID: &str = "site";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HowItWorksStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClockWidgetStyle {
    pub variant: String,
    pub accent_color: String,
    pub show_seconds: bool,
}

impl Default for ClockWidgetStyle {
    fn default() -> Self {
        Self {
            variant: "analog".to_string(),
            accent_color: "#b71c1c".to_string(),
            show_seconds: false,
        }
    }
}

/// Singleton site-content row. The steps and clock-widget attributes are
/// stored as JSON text columns and parsed at the API boundary.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SiteSettings {
    pub id: String,
    pub tagline_text: String,
    pub how_it_works_title: String,
    pub how_it_works_description: String,
    pub how_it_works_steps: String,
    pub clock_widget: String,
    pub updated_at: DateTime<Utc>,
}

impl SiteSettings {
    /// Served when no row has been written yet.
    pub fn defaults() -> Self {
        Self {
            id: SITE_SETTINGS_ID.to_string(),
            tagline_text: "Book your table for our next event".to_string(),
            how_it_works_title: "How it works".to_string(),
            how_it_works_description: "Reserve your seats in three steps.".to_string(),
            how_it_works_steps: serde_json::to_string(&[
                HowItWorksStep {
                    title: "Pick an event".to_string(),
                    description: "Browse the upcoming events and choose one.".to_string(),
                },
                HowItWorksStep {
                    title: "Choose a session".to_string(),
                    description: "Select a time and the number of seats.".to_string(),
                },
                HowItWorksStep {
                    title: "Confirm".to_string(),
                    description: "Leave your contact details and submit.".to_string(),
                },
            ]).unwrap_or_else(|_| "[]".to_string()),
            clock_widget: serde_json::to_string(&ClockWidgetStyle::default())
                .unwrap_or_else(|_| "{}".to_string()),
            updated_at: Utc::now(),
        }
    }
}
