//! Vercel deployments API client

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use zipdeploy_core::{
    models::{DeploymentRequest, DeploymentResult},
    AppError, VercelConfig,
};

use super::DeploymentPlatform;

const DEPLOYMENTS_PATH: &str = "/v13/deployments";

/// Subset of the create-deployment response this pipeline relies on
#[derive(Debug, Deserialize)]
struct CreateDeploymentResponse {
    id: Option<String>,
    #[serde(default)]
    alias: Vec<String>,
}

pub struct VercelClient {
    http_client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    team_id: Option<String>,
}

impl Debug for VercelClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VercelClient")
            .field("api_url", &self.api_url)
            .field("has_token", &self.token.is_some())
            .field("team_id", &self.team_id)
            .finish()
    }
}

impl VercelClient {
    pub fn new(config: &VercelConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for Vercel API")?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            team_id: config.team_id.clone(),
        })
    }

    fn deployments_url(&self) -> String {
        format!("{}{}", self.api_url, DEPLOYMENTS_PATH)
    }
}

/// Turn a platform alias into a public URL. Aliases normally come without a scheme.
fn alias_to_url(alias: &str) -> String {
    if alias.starts_with("https://") || alias.starts_with("http://") {
        alias.to_string()
    } else {
        format!("https://{}", alias)
    }
}

/// Interpret a 2xx body. Anything short of an alias and an id is a rejection carrying the raw body.
fn parse_deployment_response(body: &str) -> Result<DeploymentResult, AppError> {
    let rejected = || AppError::DeploymentRejected {
        details: body.to_string(),
    };

    let parsed: CreateDeploymentResponse = serde_json::from_str(body).map_err(|_| rejected())?;

    let alias = parsed
        .alias
        .iter()
        .map(|a| a.trim())
        .find(|a| !a.is_empty())
        .ok_or_else(rejected)?;
    let id = parsed
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(rejected)?;

    Ok(DeploymentResult {
        url: alias_to_url(alias),
        platform_project_id: id,
    })
}

#[async_trait]
impl DeploymentPlatform for VercelClient {
    #[tracing::instrument(
        skip(self, request),
        fields(project.name = %request.name, files = request.files.len())
    )]
    async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, AppError> {
        let token = self.token.as_deref().ok_or(AppError::MissingCredential)?;

        let mut builder = self
            .http_client
            .post(self.deployments_url())
            .bearer_auth(token)
            .json(request);
        if let Some(team_id) = &self.team_id {
            builder = builder.query(&[("teamId", team_id)]);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::DeploymentRejected {
                details: format!("Request to Vercel failed: {}", e),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::DeploymentRejected {
                details: format!("Failed to read Vercel response: {}", e),
            })?;

        if !status.is_success() {
            tracing::warn!(status = %status, body = %body, "Vercel rejected deployment");
            return Err(AppError::DeploymentRejected { details: body });
        }

        let result = parse_deployment_response(&body)?;
        tracing::info!(
            url = %result.url,
            platform_project_id = %result.platform_project_id,
            "Vercel deployment created"
        );
        Ok(result)
    }
}
