//! API constants

/// Deploy route
pub const DEPLOY_PATH: &str = "/api/deploy";

/// Misspelled path still used by existing clients
pub const LEGACY_DEPLOY_PATH: &str = "/api/deplay";

/// Multipart field carrying the archive
pub const ARCHIVE_FIELD: &str = "zipFile";

/// Multipart field carrying the project name
pub const PROJECT_NAME_FIELD: &str = "projectName";
