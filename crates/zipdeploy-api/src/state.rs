//! Application state shared by handlers.

use zipdeploy_core::Config;
use zipdeploy_services::DeploymentPipeline;

/// How the caller identity is resolved for each request
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    /// Lowercased header name set by the authenticating proxy
    pub header: String,
    pub default_owner_id: Option<String>,
}

impl From<&Config> for IdentityConfig {
    fn from(config: &Config) -> Self {
        Self {
            header: config.owner_id_header.clone(),
            default_owner_id: config.default_owner_id.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub identity: IdentityConfig,
    pub pipeline: DeploymentPipeline,
}

impl AppState {
    pub fn new(config: Config, pipeline: DeploymentPipeline) -> Self {
        let identity = IdentityConfig::from(&config);
        Self {
            config,
            identity,
            pipeline,
        }
    }
}
