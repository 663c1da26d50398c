//! Persisted representations of a mapping set.
//!
//! Two codecs implement one contract: the Exploded directory-of-files
//! layout and the Single-Document aggregated file. Pipeline code stays
//! codec-agnostic through the [`MappingCodec`] trait, and for either codec
//! `read(write(set)) == set` under structural equality. Reading a missing
//! or empty destination yields the empty set, so promotion workflows can
//! treat "nothing there yet" as a no-op rather than a failure.

mod exploded;
mod schema;
mod single_file;

pub use exploded::ExplodedCodec;
pub use single_file::SingleFileCodec;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::MappingSet;

/// Failures of a storage read or write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("i/o failure at {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },
    /// Stored content could not be decoded into a valid set.
    #[error("malformed mapping data in {}: {reason}", path.display())]
    Malformed {
        /// Offending file.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },
    /// A set could not be encoded for storage.
    #[error("failed to encode mapping data for {}: {reason}", path.display())]
    Encode {
        /// Intended destination.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// The file declared a format version this build does not understand.
    #[error("unsupported format version `{found}` in {}, supported major version is {supported}", path.display())]
    UnsupportedVersion {
        /// File carrying the version marker.
        path: PathBuf,
        /// Version string found.
        found: String,
        /// Major version this build reads.
        supported: u32,
    },
    /// The destination exists but is not the kind of thing this codec
    /// produces (a file where a directory is needed, or vice versa).
    #[error("destination {} is occupied by incompatible content", path.display())]
    IncompatibleDestination {
        /// Occupied path.
        path: PathBuf,
    },
    /// A file's declared identifier disagrees with its location.
    #[error("{} declares name `{declared}` but its location implies `{expected}`", path.display())]
    NameMismatch {
        /// Offending file.
        path: PathBuf,
        /// Identifier found inside the file.
        declared: String,
        /// Identifier derived from the file's path.
        expected: String,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Convenience alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A persisted representation of a [`MappingSet`].
pub trait MappingCodec {
    /// Writes `set` to `destination`, replacing previous content
    /// atomically: either the new content is fully in place afterwards or
    /// the old content is untouched.
    ///
    /// # Errors
    ///
    /// Fails when the destination is unwritable or occupied by
    /// incompatible content, or when encoding fails; no partial output is
    /// left behind.
    fn write(&self, set: &MappingSet, destination: &Path) -> StorageResult<()>;

    /// Reads a set back from `source`. A missing or empty source yields
    /// the empty set.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, undecodable or duplicate content, or an
    /// unsupported format version.
    fn read(&self, source: &Path) -> StorageResult<MappingSet>;
}
