//! Project store implementations
//!
//! The pipeline only ever inserts; no read, update or query interface exists here.

mod postgres;
mod supabase;

use async_trait::async_trait;
use zipdeploy_core::{models::ProjectRecord, AppError};

pub use postgres::PostgresProjectStore;
pub use supabase::SupabaseProjectStore;

/// Destination for project records. Failures surface as `AppError::PersistenceFailure`.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, record: &ProjectRecord) -> Result<(), AppError>;
}
