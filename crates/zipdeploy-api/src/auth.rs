//! Caller identity extraction.
//!
//! Authentication itself happens upstream; this crate only reads the identity the
//! authenticating layer forwards, and never invents one.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;
use zipdeploy_core::AppError;

/// Owner of the project being deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub owner_id: String,
}

// Extracted from parts so it can precede Multipart in handler arguments
impl FromRequestParts<Arc<AppState>> for CallerIdentity {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(state.identity.header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        from_header
            .or_else(|| state.identity.default_owner_id.clone())
            .map(|owner_id| CallerIdentity { owner_id })
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Missing caller identity".to_string(),
                ))
            })
    }
}
