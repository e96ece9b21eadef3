pub mod archive;
pub mod deployment;
pub mod manifest;
pub mod project;

pub use archive::{ArchiveEntry, UploadedArchive, MISSING_UPLOAD_MESSAGE};
pub use deployment::{DeploymentResponse, DeploymentResult};
pub use manifest::{DeploymentRequest, FileEncoding, ManifestEntry};
pub use project::ProjectRecord;
