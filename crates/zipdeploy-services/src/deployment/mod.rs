//! Remote deployment platform abstraction.

mod vercel;

use async_trait::async_trait;
use zipdeploy_core::{
    models::{DeploymentRequest, DeploymentResult},
    AppError,
};

pub use vercel::VercelClient;

/// A platform that turns a manifest into a live deployment in a single request.
/// Implementations make exactly one attempt; retrying is the caller's decision.
#[async_trait]
pub trait DeploymentPlatform: Send + Sync {
    /// Fails with `MissingCredential` before any network I/O when unauthenticated,
    /// and with `DeploymentRejected` when the platform refuses or answers incompletely.
    async fn deploy(&self, request: &DeploymentRequest) -> Result<DeploymentResult, AppError>;
}
