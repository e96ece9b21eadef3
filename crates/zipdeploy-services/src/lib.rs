//! Zipdeploy Services
//!
//! The deployment pipeline: archive reading, manifest building, the remote platform
//! client, outcome recording and the orchestrator sequencing them.

pub mod archive;
pub mod deployment;
pub mod pipeline;
pub mod recorder;

pub use archive::{build_manifest, ArchiveReader, ManifestBuilder};
pub use deployment::{DeploymentPlatform, VercelClient};
pub use pipeline::{DeploymentPipeline, PipelineFailure, PipelineOutcome, PipelineStage};
pub use recorder::{OutcomeRecorder, RecordOutcome};
