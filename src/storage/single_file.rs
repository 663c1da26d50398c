//! Single-Document codec: the whole set as one pretty-printed JSON file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::schema::{self, MappingDocument};
use super::{MappingCodec, StorageError, StorageResult};
use crate::model::MappingSet;

/// Writes and reads the aggregated one-file form.
///
/// The document preserves the container's insertion order exactly, so a
/// round trip reproduces the input file byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleFileCodec;

impl SingleFileCodec {
    /// Creates the codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MappingCodec for SingleFileCodec {
    fn write(&self, set: &MappingSet, destination: &Path) -> StorageResult<()> {
        if destination.is_dir() {
            return Err(StorageError::IncompatibleDestination {
                path: destination.to_path_buf(),
            });
        }
        let parent = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|source| StorageError::io(parent, source))?;

        let document = schema::document_from_set(set);
        let json = serde_json::to_string_pretty(&document).map_err(|source| {
            StorageError::Encode { path: destination.to_path_buf(), reason: source.to_string() }
        })?;

        // Stage next to the destination so the final rename is atomic.
        let mut staged =
            NamedTempFile::new_in(parent).map_err(|source| StorageError::io(parent, source))?;
        staged
            .write_all(json.as_bytes())
            .and_then(|()| staged.write_all(b"\n"))
            .map_err(|source| StorageError::io(destination, source))?;
        staged
            .persist(destination)
            .map_err(|source| StorageError::io(destination, source.error))?;

        tracing::debug!(
            classes = set.class_count(),
            packages = set.package_count(),
            path = %destination.display(),
            "wrote mapping document"
        );
        Ok(())
    }

    fn read(&self, source: &Path) -> StorageResult<MappingSet> {
        if !source.exists() {
            return Ok(MappingSet::empty());
        }
        if source.is_dir() {
            return Err(StorageError::IncompatibleDestination { path: source.to_path_buf() });
        }
        let text =
            fs::read_to_string(source).map_err(|cause| StorageError::io(source, cause))?;
        if text.trim().is_empty() {
            return Ok(MappingSet::empty());
        }

        let document: MappingDocument = serde_json::from_str(&text).map_err(|cause| {
            StorageError::Malformed { path: source.to_path_buf(), reason: cause.to_string() }
        })?;
        if !schema::supported_version(&document.version) {
            return Err(StorageError::UnsupportedVersion {
                path: source.to_path_buf(),
                found: document.version,
                supported: schema::SUPPORTED_MAJOR,
            });
        }
        schema::set_from_document(document).map_err(|reason| StorageError::Malformed {
            path: source.to_path_buf(),
            reason,
        })
    }
}
