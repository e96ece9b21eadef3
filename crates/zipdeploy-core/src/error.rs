//! Error types module
//!
//! All pipeline failures are unified under the `AppError` enum. Each variant maps to
//! one stage of the deployment pipeline (input, archive, manifest, deployment,
//! persistence) so callers can tell which stage failed without string matching.
//!
//! The `From<sqlx::Error>` conversion is gated behind the `sqlx` feature and maps to
//! `PersistenceFailure`, since the metadata store is the only database consumer.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues or rejected uploads
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CORRUPT_ARCHIVE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Archive contains no deployable files")]
    EmptyManifest,

    #[error("Deployment credential is not configured")]
    MissingCredential,

    #[error("Deployment rejected by platform: {details}")]
    DeploymentRejected { details: String },

    #[error("Failed to persist project record: {details}")]
    PersistenceFailure { details: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::PersistenceFailure {
            details: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Provide both projectName and zipFile fields"),
            false,
            LogLevel::Debug,
        ),
        AppError::CorruptArchive(_) => (
            400,
            "CORRUPT_ARCHIVE",
            false,
            Some("Re-create the ZIP archive and upload again"),
            false,
            LogLevel::Debug,
        ),
        AppError::EmptyManifest => (
            400,
            "EMPTY_MANIFEST",
            false,
            Some("Upload an archive that contains at least one file"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingCredential => (
            500,
            "MISSING_CREDENTIAL",
            false,
            Some("Contact the operator to configure the deployment token"),
            false,
            LogLevel::Error,
        ),
        AppError::DeploymentRejected { .. } => (
            502,
            "DEPLOYMENT_REJECTED",
            true,
            Some("Inspect the platform error and resubmit"),
            false,
            LogLevel::Warn,
        ),
        AppError::PersistenceFailure { .. } => (
            500,
            "PERSISTENCE_FAILURE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Unauthorized(_) => (
            401,
            "UNAUTHORIZED",
            false,
            Some("Authenticate before deploying"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce archive size"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::CorruptArchive(_) => "CorruptArchive",
            AppError::EmptyManifest => "EmptyManifest",
            AppError::MissingCredential => "MissingCredential",
            AppError::DeploymentRejected { .. } => "DeploymentRejected",
            AppError::PersistenceFailure { .. } => "PersistenceFailure",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::CorruptArchive(_) => "File ZIP tidak valid.".to_string(),
            AppError::EmptyManifest => {
                "File ZIP kosong atau tidak berisi file yang valid.".to_string()
            }
            AppError::MissingCredential => "Token Vercel tidak ditemukan.".to_string(),
            AppError::DeploymentRejected { .. } => "Vercel deployment gagal.".to_string(),
            AppError::PersistenceFailure { .. } => "Gagal menyimpan ke database.".to_string(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Terjadi kesalahan internal.".to_string(),
            AppError::InternalWithSource { .. } => "Terjadi kesalahan internal.".to_string(),
        }
    }
}
