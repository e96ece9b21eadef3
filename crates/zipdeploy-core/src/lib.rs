//! Zipdeploy Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! the deployment pipeline, the metadata store and the HTTP adapter.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ArchivePathPolicy, Config, LogFormat, MetadataStoreKind, VercelConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
