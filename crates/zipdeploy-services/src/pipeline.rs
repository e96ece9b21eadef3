//! Deployment pipeline orchestrator
//!
//! Sequences `RECEIVED -> EXTRACTED -> MANIFESTED -> DEPLOYED -> RECORDED`. Every stage
//! up to `DEPLOYED` is fatal on failure; recording is best-effort and only degrades
//! the outcome. There are no retries and no rollback.

use bytes::Bytes;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use zipdeploy_core::{
    models::{DeploymentRequest, DeploymentResult, ManifestEntry, ProjectRecord, UploadedArchive},
    AppError, ArchivePathPolicy,
};
use zipdeploy_db::ProjectStore;

use crate::archive::{ArchiveReader, ManifestBuilder};
use crate::deployment::DeploymentPlatform;
use crate::recorder::{OutcomeRecorder, RecordOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Extracted,
    Manifested,
    Deployed,
    Recorded,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PipelineStage::Received => write!(f, "received"),
            PipelineStage::Extracted => write!(f, "extracted"),
            PipelineStage::Manifested => write!(f, "manifested"),
            PipelineStage::Deployed => write!(f, "deployed"),
            PipelineStage::Recorded => write!(f, "recorded"),
        }
    }
}

/// Fatal failure. `stage` is the state the pipeline was trying to reach.
#[derive(Debug, thiserror::Error)]
#[error("pipeline failed at {stage}: {error}")]
pub struct PipelineFailure {
    pub stage: PipelineStage,
    #[source]
    pub error: AppError,
}

impl PipelineFailure {
    pub fn new(stage: PipelineStage, error: AppError) -> Self {
        Self { stage, error }
    }
}

/// A live deployment, plus whether it was recorded.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub deployment: DeploymentResult,
    pub record: RecordOutcome,
}

impl PipelineOutcome {
    /// `Recorded` when persistence succeeded, otherwise the run stopped at `Deployed`.
    pub fn final_stage(&self) -> PipelineStage {
        if self.record.is_recorded() {
            PipelineStage::Recorded
        } else {
            PipelineStage::Deployed
        }
    }
}

#[derive(Clone)]
pub struct DeploymentPipeline {
    platform: Arc<dyn DeploymentPlatform>,
    recorder: OutcomeRecorder,
    path_policy: ArchivePathPolicy,
}

impl DeploymentPipeline {
    pub fn new(
        platform: Arc<dyn DeploymentPlatform>,
        store: Arc<dyn ProjectStore>,
        path_policy: ArchivePathPolicy,
    ) -> Self {
        Self {
            platform,
            recorder: OutcomeRecorder::new(store),
            path_policy,
        }
    }

    /// Run one submission end to end on behalf of `owner_id`.
    #[tracing::instrument(
        skip(self, archive, project_name, owner_id),
        fields(project.name = ?project_name, owner.id = %owner_id)
    )]
    pub async fn run(
        &self,
        archive: Option<Bytes>,
        project_name: Option<String>,
        owner_id: &str,
    ) -> Result<PipelineOutcome, PipelineFailure> {
        let upload = UploadedArchive::new(archive, project_name)
            .map_err(|e| PipelineFailure::new(PipelineStage::Received, e))?;
        // Input problems are reported before a missing identity
        if owner_id.trim().is_empty() {
            return Err(PipelineFailure::new(
                PipelineStage::Received,
                AppError::Unauthorized("Missing caller identity".to_string()),
            ));
        }
        tracing::debug!(
            stage = %PipelineStage::Received,
            archive_bytes = upload.data.len(),
            "Upload accepted"
        );

        let UploadedArchive { data, project_name } = upload;
        let policy = self.path_policy;
        let files = tokio::task::spawn_blocking(move || extract_manifest(data, policy))
            .await
            .map_err(|e| {
                PipelineFailure::new(
                    PipelineStage::Extracted,
                    AppError::Internal(format!("Archive task failed: {}", e)),
                )
            })??;

        let request = DeploymentRequest::new(project_name, files)
            .map_err(|e| PipelineFailure::new(PipelineStage::Manifested, e))?;
        tracing::debug!(
            stage = %PipelineStage::Manifested,
            files = request.files.len(),
            "Manifest ready"
        );

        let deployment = self
            .platform
            .deploy(&request)
            .await
            .map_err(|e| PipelineFailure::new(PipelineStage::Deployed, e))?;
        tracing::debug!(stage = %PipelineStage::Deployed, url = %deployment.url, "Deployment live");

        let record = ProjectRecord::new(owner_id, &request.name, &deployment);
        let record = self.recorder.record(record).await;

        Ok(PipelineOutcome { deployment, record })
    }
}

fn extract_manifest(
    data: Bytes,
    policy: ArchivePathPolicy,
) -> Result<Vec<ManifestEntry>, PipelineFailure> {
    let mut reader = ArchiveReader::from_bytes(data)
        .map_err(|e| PipelineFailure::new(PipelineStage::Extracted, e))?;
    tracing::debug!(
        stage = %PipelineStage::Extracted,
        entries = reader.len(),
        "Archive opened"
    );

    let mut entries = reader.entries();
    let manifest = ManifestBuilder::new(policy)
        .build(entries.by_ref())
        .map_err(|e| PipelineFailure::new(PipelineStage::Manifested, e))?;
    tracing::debug!(
        skipped_directories = entries.skipped_directories(),
        "Directory entries skipped"
    );
    Ok(manifest)
}
