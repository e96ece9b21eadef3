use async_trait::async_trait;
use sqlx::PgPool;
use zipdeploy_core::{models::ProjectRecord, AppError};

use super::ProjectStore;

/// Repository for the `projects` table
#[derive(Clone)]
pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PostgresProjectStore {
    #[tracing::instrument(
        skip(self, record),
        fields(db.table = "projects", db.operation = "insert", project.name = %record.name)
    )]
    async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO projects (user_id, name, deployment_url, vercel_project_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.owner_id)
        .bind(&record.name)
        .bind(&record.deployment_url)
        .bind(&record.platform_project_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
