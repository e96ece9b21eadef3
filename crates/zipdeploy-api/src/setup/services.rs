//! Pipeline and collaborator initialization

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use zipdeploy_core::{Config, MetadataStoreKind};
use zipdeploy_db::{PostgresProjectStore, ProjectStore, SupabaseProjectStore};
use zipdeploy_services::{DeploymentPipeline, VercelClient};

/// Build the metadata store selected by configuration
pub async fn setup_project_store(config: &Config) -> Result<Arc<dyn ProjectStore>> {
    match config.metadata_store {
        MetadataStoreKind::Postgres => {
            let pool = super::database::setup_database(config).await?;
            Ok(Arc::new(PostgresProjectStore::new(pool)))
        }
        MetadataStoreKind::Supabase => {
            let url = config
                .supabase_url
                .as_deref()
                .context("SUPABASE_URL must be set")?;
            let key = config
                .supabase_service_role_key
                .as_deref()
                .context("SUPABASE_SERVICE_ROLE_KEY must be set")?;
            let store = SupabaseProjectStore::new(url, key)?;
            tracing::info!(supabase_url = %url, "Supabase project store configured");
            Ok(Arc::new(store))
        }
    }
}

/// Initialize the deployment pipeline and application state
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let store = setup_project_store(config).await?;
    let platform = Arc::new(VercelClient::new(&config.vercel)?);
    tracing::info!(api_url = %config.vercel.api_url, "Vercel client configured");

    let pipeline = DeploymentPipeline::new(platform, store, config.archive_path_policy);
    Ok(Arc::new(AppState::new(config.clone(), pipeline)))
}
