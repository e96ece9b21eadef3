use bytes::Bytes;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;
use zipdeploy_core::{models::ArchiveEntry, AppError};

/// Reader over a ZIP container. Only the central directory is parsed up front;
/// entry contents are decompressed one at a time as the entries are visited.
pub struct ArchiveReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl ArchiveReader<Cursor<Bytes>> {
    pub fn from_bytes(data: Bytes) -> Result<Self, AppError> {
        Self::new(Cursor::new(data))
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    pub fn new(reader: R) -> Result<Self, AppError> {
        let archive =
            ZipArchive::new(reader).map_err(|e| AppError::CorruptArchive(e.to_string()))?;
        Ok(Self { archive })
    }

    /// Number of entries in the container, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Lazily enumerate file entries, skipping directories.
    pub fn entries(&mut self) -> ArchiveEntries<'_, R> {
        ArchiveEntries {
            archive: &mut self.archive,
            index: 0,
            skipped_directories: 0,
        }
    }
}

/// Iterator returned by [`ArchiveReader::entries`]
pub struct ArchiveEntries<'a, R: Read + Seek> {
    archive: &'a mut ZipArchive<R>,
    index: usize,
    skipped_directories: usize,
}

impl<R: Read + Seek> ArchiveEntries<'_, R> {
    pub fn skipped_directories(&self) -> usize {
        self.skipped_directories
    }
}

impl<R: Read + Seek> Iterator for ArchiveEntries<'_, R> {
    type Item = Result<ArchiveEntry, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.archive.len() {
            let index = self.index;
            self.index += 1;

            let mut file = match self.archive.by_index(index) {
                Ok(file) => file,
                Err(e) => {
                    return Some(Err(AppError::CorruptArchive(format!(
                        "entry #{}: {}",
                        index, e
                    ))))
                }
            };

            // Trailing separator marks a directory in the ZIP format
            if file.is_dir() {
                self.skipped_directories += 1;
                continue;
            }

            let path = file.name().to_string();
            let mut content = Vec::new();
            if let Err(e) = file.read_to_end(&mut content) {
                return Some(Err(AppError::CorruptArchive(format!("{}: {}", path, e))));
            }

            return Some(Ok(ArchiveEntry {
                path,
                is_directory: false,
                content,
            }));
        }
        None
    }
}
