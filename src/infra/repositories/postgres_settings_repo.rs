use crate::domain::{models::settings::{SiteSettings, SITE_SETTINGS_ID}, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepo {
    async fn get(&self) -> Result<Option<SiteSettings>, AppError> {
        sqlx::query_as::<_, SiteSettings>("SELECT * FROM site_settings WHERE id = $1")
            .bind(SITE_SETTINGS_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert(&self, settings: &SiteSettings) -> Result<SiteSettings, AppError> {
        sqlx::query_as::<_, SiteSettings>(
            r#"INSERT INTO site_settings (id, tagline_text, how_it_works_title, how_it_works_description, how_it_works_steps, clock_widget, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT(id) DO UPDATE SET
                   tagline_text = excluded.tagline_text,
                   how_it_works_title = excluded.how_it_works_title,
                   how_it_works_description = excluded.how_it_works_description,
                   how_it_works_steps = excluded.how_it_works_steps,
                   clock_widget = excluded.clock_widget,
                   updated_at = excluded.updated_at
               RETURNING *"#
        )
            .bind(&settings.id)
            .bind(&settings.tagline_text)
            .bind(&settings.how_it_works_title)
            .bind(&settings.how_it_works_description)
            .bind(&settings.how_it_works_steps)
            .bind(&settings.clock_widget)
            .bind(settings.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
