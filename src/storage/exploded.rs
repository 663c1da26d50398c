//! Exploded codec: one YAML file per class under a directory tree that
//! mirrors the package structure.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::schema::{self, ClassEntry, PackageEntry};
use super::{MappingCodec, StorageError, StorageResult};
use crate::model::{MappingSet, MappingSetBuilder};

const INDEX_FILE: &str = "index.yaml";
const DATA_DIR: &str = "data";
const PACKAGE_INFO_FILE: &str = "package-info.yaml";
const CLASS_FILE_EXTENSION: &str = "yaml";

/// Writes and reads the directory-per-package, file-per-class form.
///
/// Output is normalized: classes and members are sorted by identifier, so
/// two structurally equal sets always produce identical trees regardless
/// of insertion order. The tree is rooted at `<destination>/index.yaml`
/// plus a `data/` subtree; keeping class files out of the root means a
/// class can never collide with the index file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplodedCodec;

impl ExplodedCodec {
    /// Creates the codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Root marker listing everything the tree contains.
#[derive(Debug, Serialize, Deserialize)]
struct IndexDocument {
    version: String,
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    classes: Vec<String>,
}

impl MappingCodec for ExplodedCodec {
    fn write(&self, set: &MappingSet, destination: &Path) -> StorageResult<()> {
        check_writable_destination(destination)?;
        let parent = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|source| StorageError::io(parent, source))?;

        // Build the whole tree in a sibling staging directory, then swap
        // it into place so readers never see a half-written tree.
        let staging =
            tempfile::tempdir_in(parent).map_err(|source| StorageError::io(parent, source))?;
        write_tree(set, staging.path())?;

        // Move the old tree aside rather than deleting it, so a failed
        // swap can put it back. Dropping the backup dir discards it.
        let backup = if destination.exists() {
            let holder =
                tempfile::tempdir_in(parent).map_err(|source| StorageError::io(parent, source))?;
            let previous = holder.path().join("previous");
            fs::rename(destination, &previous)
                .map_err(|source| StorageError::io(destination, source))?;
            Some((holder, previous))
        } else {
            None
        };
        let staged = staging.keep();
        if let Err(source) = fs::rename(&staged, destination) {
            let _ = fs::remove_dir_all(&staged);
            if let Some((_, previous)) = &backup {
                let _ = fs::rename(previous, destination);
            }
            return Err(StorageError::io(destination, source));
        }
        drop(backup);

        tracing::debug!(
            classes = set.class_count(),
            packages = set.package_count(),
            path = %destination.display(),
            "wrote exploded mapping tree"
        );
        Ok(())
    }

    fn read(&self, source: &Path) -> StorageResult<MappingSet> {
        if !source.exists() {
            return Ok(MappingSet::empty());
        }
        if source.is_file() {
            return Err(StorageError::IncompatibleDestination { path: source.to_path_buf() });
        }

        let index_path = source.join(INDEX_FILE);
        if index_path.is_file() {
            let text = fs::read_to_string(&index_path)
                .map_err(|cause| StorageError::io(&index_path, cause))?;
            let index: IndexDocument = serde_yaml::from_str(&text).map_err(|cause| {
                StorageError::Malformed { path: index_path.clone(), reason: cause.to_string() }
            })?;
            if !schema::supported_version(&index.version) {
                return Err(StorageError::UnsupportedVersion {
                    path: index_path,
                    found: index.version,
                    supported: schema::SUPPORTED_MAJOR,
                });
            }
        }

        read_tree(&source.join(DATA_DIR))
    }
}

/// Rejects destinations this codec cannot replace: plain files, and
/// directories with content that was clearly not produced by it.
fn check_writable_destination(destination: &Path) -> StorageResult<()> {
    if destination.is_file() {
        return Err(StorageError::IncompatibleDestination { path: destination.to_path_buf() });
    }
    if destination.is_dir() {
        let mut entries = fs::read_dir(destination)
            .map_err(|source| StorageError::io(destination, source))?;
        let occupied = entries.next().is_some();
        if occupied && !destination.join(INDEX_FILE).is_file() {
            return Err(StorageError::IncompatibleDestination {
                path: destination.to_path_buf(),
            });
        }
    }
    Ok(())
}

fn write_tree(set: &MappingSet, root: &Path) -> StorageResult<()> {
    let mut packages: Vec<&str> = set.packages().map(|package| package.name()).collect();
    packages.sort_unstable();
    let mut classes: Vec<&str> = set.classes().map(|class| class.name()).collect();
    classes.sort_unstable();

    let index = IndexDocument {
        version: schema::FORMAT_VERSION.to_string(),
        packages: packages.iter().map(|name| (*name).to_string()).collect(),
        classes: classes.iter().map(|name| (*name).to_string()).collect(),
    };
    write_yaml(&root.join(INDEX_FILE), &index)?;

    let data_root = root.join(DATA_DIR);
    fs::create_dir_all(&data_root).map_err(|source| StorageError::io(&data_root, source))?;

    for name in packages {
        if let Some(package) = set.package(name) {
            let path = package_info_path(&data_root, name)?;
            write_yaml(&path, &schema::package_entry(package))?;
        }
    }
    for name in classes {
        if let Some(class) = set.class(name) {
            let mut entry = schema::class_entry(class);
            schema::sort_class_entry(&mut entry);
            let path = class_file_path(&data_root, name)?;
            write_yaml(&path, &entry)?;
        }
    }
    Ok(())
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    let text = serde_yaml::to_string(value).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        reason: source.to_string(),
    })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::io(parent, source))?;
    }
    fs::write(path, text).map_err(|source| StorageError::io(path, source))
}

/// `com.example` becomes `<data>/com/example/package-info.yaml`.
fn package_info_path(data_root: &Path, name: &str) -> StorageResult<PathBuf> {
    let mut path = data_root.to_path_buf();
    for segment in name.split('.') {
        check_segment(data_root, name, segment)?;
        path.push(segment);
    }
    path.push(PACKAGE_INFO_FILE);
    Ok(path)
}

/// `com/example/Widget` becomes `<data>/com/example/Widget.yaml`.
fn class_file_path(data_root: &Path, name: &str) -> StorageResult<PathBuf> {
    let mut path = data_root.to_path_buf();
    let mut segments = name.split('/').peekable();
    while let Some(segment) = segments.next() {
        check_segment(data_root, name, segment)?;
        if segments.peek().is_some() {
            path.push(segment);
        } else {
            path.push(format!("{segment}.{CLASS_FILE_EXTENSION}"));
        }
    }
    Ok(path)
}

/// Keeps derived file paths inside the tree. Identifiers with empty,
/// dot-only, or separator-carrying segments cannot be stored.
fn check_segment(data_root: &Path, name: &str, segment: &str) -> StorageResult<()> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
        return Err(StorageError::Encode {
            path: data_root.to_path_buf(),
            reason: format!("identifier `{name}` does not map to a storable path"),
        });
    }
    Ok(())
}

fn read_tree(data_root: &Path) -> StorageResult<MappingSet> {
    if !data_root.is_dir() {
        return Ok(MappingSet::empty());
    }

    let mut packages: Vec<(String, PathBuf)> = Vec::new();
    let mut classes: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(data_root).follow_links(false) {
        let entry = entry.map_err(|cause| StorageError::Malformed {
            path: data_root.to_path_buf(),
            reason: cause.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.file_name().is_some_and(|file| file == PACKAGE_INFO_FILE) {
            let name = derived_package_name(data_root, &path)?;
            packages.push((name, path));
        } else if path.extension().is_some_and(|ext| ext == CLASS_FILE_EXTENSION) {
            let name = derived_class_name(data_root, &path)?;
            classes.push((name, path));
        }
    }
    // Identifier order, so the rebuilt set is independent of the
    // filesystem's directory-walk order.
    packages.sort_by(|a, b| a.0.cmp(&b.0));
    classes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut builder = MappingSetBuilder::new();
    for (expected, path) in packages {
        let entry: PackageEntry = read_yaml(&path)?;
        if entry.name != expected {
            return Err(StorageError::NameMismatch {
                path,
                declared: entry.name,
                expected,
            });
        }
        schema::add_package_entry(&mut builder, entry)
            .map_err(|reason| StorageError::Malformed { path, reason })?;
    }
    for (expected, path) in classes {
        let entry: ClassEntry = read_yaml(&path)?;
        if entry.name != expected {
            return Err(StorageError::NameMismatch {
                path,
                declared: entry.name,
                expected,
            });
        }
        schema::add_class_entry(&mut builder, entry)
            .map_err(|reason| StorageError::Malformed { path, reason })?;
    }
    Ok(builder.build())
}

fn read_yaml<T: for<'de> Deserialize<'de>>(path: &Path) -> StorageResult<T> {
    let text = fs::read_to_string(path).map_err(|cause| StorageError::io(path, cause))?;
    serde_yaml::from_str(&text).map_err(|cause| StorageError::Malformed {
        path: path.to_path_buf(),
        reason: cause.to_string(),
    })
}

fn derived_package_name(data_root: &Path, path: &Path) -> StorageResult<String> {
    let relative = path
        .parent()
        .and_then(|parent| parent.strip_prefix(data_root).ok())
        .ok_or_else(|| malformed_location(data_root, path))?;
    let segments = normal_components(relative).ok_or_else(|| malformed_location(data_root, path))?;
    Ok(segments.join("."))
}

fn derived_class_name(data_root: &Path, path: &Path) -> StorageResult<String> {
    let relative = path
        .strip_prefix(data_root)
        .ok()
        .and_then(|relative| relative.with_extension("").into_os_string().into_string().ok())
        .ok_or_else(|| malformed_location(data_root, path))?;
    let relative = Path::new(&relative);
    let segments = normal_components(relative).ok_or_else(|| malformed_location(data_root, path))?;
    Ok(segments.join("/"))
}

fn normal_components(path: &Path) -> Option<Vec<&str>> {
    path.components()
        .map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect()
}

fn malformed_location(data_root: &Path, path: &Path) -> StorageError {
    StorageError::Malformed {
        path: path.to_path_buf(),
        reason: format!("file is not under the data root {}", data_root.display()),
    }
}
