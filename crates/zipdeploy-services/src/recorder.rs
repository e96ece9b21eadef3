//! Best-effort persistence of deployment outcomes.

use std::sync::Arc;
use zipdeploy_core::{models::ProjectRecord, AppError};
use zipdeploy_db::ProjectStore;

/// Result of the recording step. A failure here never undoes the deployment.
#[derive(Debug)]
pub enum RecordOutcome {
    Recorded(ProjectRecord),
    Failed {
        record: ProjectRecord,
        error: AppError,
    },
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded(_))
    }
}

#[derive(Clone)]
pub struct OutcomeRecorder {
    store: Arc<dyn ProjectStore>,
}

impl OutcomeRecorder {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    /// Persist `record`, logging instead of propagating any failure.
    pub async fn record(&self, record: ProjectRecord) -> RecordOutcome {
        match self.store.insert_project(&record).await {
            Ok(()) => {
                tracing::debug!(project.name = %record.name, "Project record stored");
                RecordOutcome::Recorded(record)
            }
            Err(err) => {
                let error = match err {
                    AppError::PersistenceFailure { .. } => err,
                    other => AppError::PersistenceFailure {
                        details: other.to_string(),
                    },
                };
                tracing::error!(
                    error = %error,
                    project.name = %record.name,
                    deployment_url = %record.deployment_url,
                    platform_project_id = %record.platform_project_id,
                    "Gagal menyimpan ke database"
                );
                RecordOutcome::Failed { record, error }
            }
        }
    }
}
