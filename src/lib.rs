//! Mapping-data toolkit: an in-memory model for name and documentation
//! mappings over JVM-shaped identifiers, with remapping between naming
//! namespaces, storage codecs, parameter-name sanitization, and a
//! pluggable validation engine.
//!
//! The [`model::MappingSet`] container is the common currency: every
//! pipeline stage consumes a set and produces a set (or a report),
//! leaving its input untouched.

pub mod metadata;
pub mod model;
pub mod remap;
pub mod sanitize;
pub mod storage;
pub mod validate;
