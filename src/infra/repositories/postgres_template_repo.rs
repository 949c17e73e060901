use crate::domain::{
    models::template::{MessageTemplate, TemplatePlaceholder},
    ports::TemplateRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTemplateRepo {
    pool: PgPool,
}

impl PostgresTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PostgresTemplateRepo {
    async fn create(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError> {
        sqlx::query_as::<_, MessageTemplate>(
            r#"INSERT INTO message_templates (id, name, content, created_at)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#
        )
            .bind(&template.id)
            .bind(&template.name)
            .bind(&template.content)
            .bind(template.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MessageTemplate>, AppError> {
        sqlx::query_as::<_, MessageTemplate>("SELECT * FROM message_templates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<MessageTemplate>, AppError> {
        sqlx::query_as::<_, MessageTemplate>("SELECT * FROM message_templates ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, template: &MessageTemplate) -> Result<MessageTemplate, AppError> {
        sqlx::query_as::<_, MessageTemplate>(
            "UPDATE message_templates SET name=$1, content=$2 WHERE id=$3 RETURNING *"
        )
            .bind(&template.name)
            .bind(&template.content)
            .bind(&template.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM message_templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Template not found".into()));
        }
        Ok(())
    }

    async fn list_placeholders(&self) -> Result<Vec<TemplatePlaceholder>, AppError> {
        sqlx::query_as::<_, TemplatePlaceholder>(
            "SELECT * FROM template_placeholders ORDER BY protected DESC, key ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_placeholder(&self, key: &str) -> Result<Option<TemplatePlaceholder>, AppError> {
        sqlx::query_as::<_, TemplatePlaceholder>("SELECT * FROM template_placeholders WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_placeholder(&self, placeholder: &TemplatePlaceholder) -> Result<TemplatePlaceholder, AppError> {
        sqlx::query_as::<_, TemplatePlaceholder>(
            r#"INSERT INTO template_placeholders (key, description, protected, created_at)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#
        )
            .bind(&placeholder.key)
            .bind(&placeholder.description)
            .bind(placeholder.protected)
            .bind(placeholder.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_placeholder(&self, key: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM template_placeholders WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Placeholder not found".into()));
        }
        Ok(())
    }
}
