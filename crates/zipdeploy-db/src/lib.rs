//! Zipdeploy metadata store
//!
//! Persistence of project records produced by successful deployments.

pub mod db;

pub use db::{PostgresProjectStore, ProjectStore, SupabaseProjectStore};
