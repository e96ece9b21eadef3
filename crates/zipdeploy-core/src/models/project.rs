use serde::{Deserialize, Serialize};

use super::DeploymentResult;

/// Row written to the `projects` collection once per successful deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub owner_id: String,
    pub name: String,
    pub deployment_url: String,
    pub platform_project_id: String,
}

impl ProjectRecord {
    pub fn new(owner_id: &str, name: &str, deployment: &DeploymentResult) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            deployment_url: deployment.url.clone(),
            platform_project_id: deployment.platform_project_id.clone(),
        }
    }
}
