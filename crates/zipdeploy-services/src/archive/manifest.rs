use zipdeploy_core::{
    models::{ArchiveEntry, ManifestEntry},
    AppError, ArchivePathPolicy,
};

/// True for paths that would escape the deployment root: absolute paths, drive
/// prefixes, empty names and any `..` component (either separator style).
pub fn is_unsafe_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return true;
    }

    // `C:`, `C:/x` or `C:\x`; a colon later in a name is legal
    let bytes = path.as_bytes();
    let has_drive_prefix = bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes.get(2), None | Some(b'/') | Some(b'\\'));
    if has_drive_prefix {
        return true;
    }

    path.split(['/', '\\']).any(|component| component == "..")
}

/// Converts archive entries into manifest entries. No path rewriting, size limit
/// or content inspection happens here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestBuilder {
    path_policy: ArchivePathPolicy,
}

impl ManifestBuilder {
    pub fn new(path_policy: ArchivePathPolicy) -> Self {
        Self { path_policy }
    }

    /// Consume `entries` one by one; fails with `EmptyManifest` when nothing deployable remains.
    pub fn build<I>(&self, entries: I) -> Result<Vec<ManifestEntry>, AppError>
    where
        I: IntoIterator<Item = Result<ArchiveEntry, AppError>>,
    {
        let mut manifest = Vec::new();
        let mut total_bytes: usize = 0;

        for entry in entries {
            let entry = entry?;
            if entry.is_directory {
                continue;
            }

            if self.path_policy == ArchivePathPolicy::RejectUnsafe && is_unsafe_path(&entry.path) {
                return Err(AppError::InvalidInput(format!(
                    "Archive entry has an unsafe path: {}",
                    entry.path
                )));
            }

            total_bytes += entry.content.len();
            manifest.push(ManifestEntry::from_bytes(entry.path, &entry.content));
        }

        if manifest.is_empty() {
            return Err(AppError::EmptyManifest);
        }

        tracing::debug!(
            files = manifest.len(),
            total_bytes,
            "Manifest built from archive"
        );

        Ok(manifest)
    }
}
