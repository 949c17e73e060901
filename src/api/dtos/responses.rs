use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::settings::{ClockWidgetStyle, HowItWorksStep, SiteSettings};

/// Settings row with the JSON text columns parsed into shapes.
#[derive(Serialize)]
pub struct SettingsResponse {
    pub tagline_text: String,
    pub how_it_works_title: String,
    pub how_it_works_description: String,
    pub how_it_works_steps: Vec<HowItWorksStep>,
    pub clock_widget: ClockWidgetStyle,
    pub updated_at: DateTime<Utc>,
}

impl From<SiteSettings> for SettingsResponse {
    fn from(settings: SiteSettings) -> Self {
        let how_it_works_steps =
            serde_json::from_str(&settings.how_it_works_steps).unwrap_or_default();
        let clock_widget =
            serde_json::from_str(&settings.clock_widget).unwrap_or_default();

        Self {
            tagline_text: settings.tagline_text,
            how_it_works_title: settings.how_it_works_title,
            how_it_works_description: settings.how_it_works_description,
            how_it_works_steps,
            clock_widget,
            updated_at: settings.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct RenderedTemplateResponse {
    pub template_id: String,
    pub rendered: String,
}
