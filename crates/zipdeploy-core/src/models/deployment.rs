use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of an accepted deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    /// Public address built from the first alias reported by the platform
    pub url: String,
    pub platform_project_id: String,
}

/// Body returned to the caller after a successful deployment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeploymentResponse {
    #[schema(example = "Deployment berhasil!")]
    pub message: String,
    #[schema(example = "https://demo-xyz.vercel.app")]
    pub url: String,
}

impl From<&DeploymentResult> for DeploymentResponse {
    fn from(result: &DeploymentResult) -> Self {
        DeploymentResponse {
            message: "Deployment berhasil!".to_string(),
            url: result.url.clone(),
        }
    }
}
