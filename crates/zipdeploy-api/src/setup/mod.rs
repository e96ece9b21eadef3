//! Application setup and initialization
//!
//! Everything main.rs needs to go from a `Config` to a served router.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use zipdeploy_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format)?;

    // Validate configuration - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment,
        metadata_store = ?config.metadata_store,
        path_policy = ?config.archive_path_policy,
        vercel_token_configured = config.vercel.token.is_some(),
        "Configuration loaded and validated successfully"
    );
    if config.vercel.token.is_none() {
        tracing::warn!("VERCEL_TOKEN is not set; deploy requests will fail with MISSING_CREDENTIAL");
    }

    let state = services::initialize_services(&config).await?;
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
