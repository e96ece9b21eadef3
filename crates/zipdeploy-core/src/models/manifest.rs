use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Text-safe encoding applied to file content in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileEncoding {
    Base64,
}

/// One file of the deployment manifest. The platform expects the path under `file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(rename = "file")]
    pub path: String,
    pub data: String,
    pub encoding: FileEncoding,
}

impl ManifestEntry {
    pub fn from_bytes(path: impl Into<String>, content: &[u8]) -> Self {
        Self {
            path: path.into(),
            data: base64::engine::general_purpose::STANDARD.encode(content),
            encoding: FileEncoding::Base64,
        }
    }

    /// Recover the original bytes from `data`.
    pub fn decode(&self) -> Result<Vec<u8>, AppError> {
        match self.encoding {
            FileEncoding::Base64 => base64::engine::general_purpose::STANDARD
                .decode(&self.data)
                .map_err(|e| AppError::Internal(format!("Invalid base64 in manifest: {}", e))),
        }
    }
}

/// Bulk-create request sent to the deployment platform
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentRequest {
    pub name: String,
    pub files: Vec<ManifestEntry>,
}

impl DeploymentRequest {
    /// A request without files is never valid.
    pub fn new(name: impl Into<String>, files: Vec<ManifestEntry>) -> Result<Self, AppError> {
        if files.is_empty() {
            return Err(AppError::EmptyManifest);
        }
        Ok(Self {
            name: name.into(),
            files,
        })
    }
}
