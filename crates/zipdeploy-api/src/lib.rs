//! Zipdeploy API Library
//!
//! This crate provides the HTTP adapter in front of the deployment pipeline:
//! multipart extraction, caller identity, routing and error rendering.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

pub mod auth;
pub mod constants;
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
