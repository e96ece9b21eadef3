use async_trait::async_trait;
use serde::Serialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use zipdeploy_core::{models::ProjectRecord, AppError};

use super::ProjectStore;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Row shape of the `projects` table as exposed through PostgREST
#[derive(Debug, Serialize)]
struct ProjectRow<'a> {
    user_id: &'a str,
    name: &'a str,
    deployment_url: &'a str,
    vercel_project_id: &'a str,
}

impl<'a> From<&'a ProjectRecord> for ProjectRow<'a> {
    fn from(record: &'a ProjectRecord) -> Self {
        Self {
            user_id: &record.owner_id,
            name: &record.name,
            deployment_url: &record.deployment_url,
            vercel_project_id: &record.platform_project_id,
        }
    }
}

/// Supabase project store over the PostgREST interface
pub struct SupabaseProjectStore {
    http_client: reqwest::Client,
    base_url: String,
    service_role_key: String,
}

impl Debug for SupabaseProjectStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SupabaseProjectStore")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SupabaseProjectStore {
    pub fn new(base_url: &str, service_role_key: &str) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client for Supabase: {}", e))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
        })
    }

    fn projects_url(&self) -> String {
        format!("{}/rest/v1/projects", self.base_url)
    }
}

#[async_trait]
impl ProjectStore for SupabaseProjectStore {
    #[tracing::instrument(
        skip(self, record),
        fields(db.table = "projects", db.operation = "insert", project.name = %record.name)
    )]
    async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError> {
        let response = self
            .http_client
            .post(self.projects_url())
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "return=minimal")
            .json(&ProjectRow::from(record))
            .send()
            .await
            .map_err(|e| AppError::PersistenceFailure {
                details: format!("Failed to reach Supabase: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::PersistenceFailure {
                details: format!("Supabase insert failed: {} - {}", status, body),
            });
        }

        Ok(())
    }
}
