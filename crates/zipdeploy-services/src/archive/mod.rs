//! Archive ingestion: ZIP reading and manifest building

mod manifest;
mod reader;

pub use manifest::{is_unsafe_path, ManifestBuilder};
pub use reader::{ArchiveEntries, ArchiveReader};

use bytes::Bytes;
use zipdeploy_core::{models::ManifestEntry, AppError, ArchivePathPolicy};

/// Open `data` as a ZIP archive and convert its files into a manifest.
/// Blocking: decompression happens inline.
pub fn build_manifest(
    data: Bytes,
    policy: ArchivePathPolicy,
) -> Result<Vec<ManifestEntry>, AppError> {
    let mut reader = ArchiveReader::from_bytes(data)?;
    ManifestBuilder::new(policy).build(reader.entries())
}
