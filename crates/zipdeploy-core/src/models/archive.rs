use bytes::Bytes;

use crate::AppError;

pub const MISSING_UPLOAD_MESSAGE: &str = "Nama proyek dan file ZIP harus diunggah.";

/// Raw upload as delivered by the HTTP adapter: archive bytes plus the declared project name.
#[derive(Debug, Clone)]
pub struct UploadedArchive {
    pub data: Bytes,
    pub project_name: String,
}

impl UploadedArchive {
    /// Both parts must be present and non-empty; whitespace around the name is dropped.
    pub fn new(data: Option<Bytes>, project_name: Option<String>) -> Result<Self, AppError> {
        let data = data
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::InvalidInput(MISSING_UPLOAD_MESSAGE.to_string()))?;
        let project_name = project_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::InvalidInput(MISSING_UPLOAD_MESSAGE.to_string()))?;

        Ok(Self { data, project_name })
    }
}

/// A single entry read out of an archive. `path` is kept exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub is_directory: bool,
    pub content: Vec<u8>,
}
