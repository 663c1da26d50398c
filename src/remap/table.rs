//! External rename table: identifier translations between two namespaces.

use indexmap::IndexMap;

use super::descriptor::remap_descriptor;
use super::RemapError;
use crate::model::MemberKey;

/// Bidirectional identifier mapping between a source and a target
/// namespace.
///
/// Class renames are keyed by class name; method and field renames are
/// keyed by (owning class, member name, descriptor). The table stores the
/// forward direction; [`reversed`](Self::reversed) derives the other one.
#[derive(Debug, Clone, Default)]
pub struct RenameTable {
    classes: IndexMap<String, ClassRename>,
}

/// Renames scoped to one class: its own new name plus member renames.
#[derive(Debug, Clone)]
pub struct ClassRename {
    mapped: String,
    methods: IndexMap<MemberKey, String>,
    fields: IndexMap<String, String>,
}

impl ClassRename {
    /// Target-namespace name of the class.
    #[must_use]
    pub fn mapped(&self) -> &str {
        &self.mapped
    }

    /// Adds a method rename keyed by source name and descriptor.
    pub fn map_method(&mut self, name: &str, descriptor: &str, to: &str) {
        self.methods.insert(MemberKey::new(name, descriptor), to.to_string());
    }

    /// Adds a field rename keyed by source name.
    pub fn map_field(&mut self, name: &str, to: &str) {
        self.fields.insert(name.to_string(), to.to_string());
    }
}

impl RenameTable {
    /// Creates an empty table. Remapping with it is the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the table contains no renames at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Adds (or updates) a class rename and returns its scope for member
    /// renames. A repeated call for the same source class replaces the
    /// previous target name.
    pub fn map_class(&mut self, from: &str, to: &str) -> &mut ClassRename {
        let entry = self.classes.entry(from.to_string()).or_insert_with(|| ClassRename {
            mapped: to.to_string(),
            methods: IndexMap::new(),
            fields: IndexMap::new(),
        });
        entry.mapped = to.to_string();
        entry
    }

    /// Target name for a class, if the table knows one.
    #[must_use]
    pub fn class_target(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(|c| c.mapped.as_str())
    }

    /// Target name for a method, if the table knows one.
    #[must_use]
    pub fn method_target(&self, class: &str, name: &str, descriptor: &str) -> Option<&str> {
        self.classes
            .get(class)?
            .methods
            .get(&MemberKey::new(name, descriptor))
            .map(String::as_str)
    }

    /// Target name for a field, if the table knows one.
    #[must_use]
    pub fn field_target(&self, class: &str, name: &str) -> Option<&str> {
        self.classes.get(class)?.fields.get(name).map(String::as_str)
    }

    /// Derives the table for the opposite direction.
    ///
    /// Method keys are re-descriptored into the target namespace, since a
    /// backward lookup sees target-namespace descriptors.
    ///
    /// # Errors
    ///
    /// Returns a [`RemapError`] when the table is internally ambiguous —
    /// two source identifiers mapping to the same target within one scope —
    /// since the reversal would silently drop one of them.
    pub fn reversed(&self) -> Result<Self, RemapError> {
        let mut out = Self::new();
        for (source_name, rename) in &self.classes {
            if let Some(previous) = out.classes.get(&rename.mapped) {
                return Err(RemapError::AmbiguousClass {
                    target: rename.mapped.clone(),
                    first: previous.mapped.clone(),
                    second: source_name.clone(),
                });
            }
            let reversed = out.map_class(&rename.mapped, source_name);
            for (key, mapped_name) in &rename.methods {
                let mapped_descriptor = remap_descriptor(&key.descriptor, self);
                let reversed_key = MemberKey::new(mapped_name, &mapped_descriptor);
                if let Some(previous) = reversed.methods.get(&reversed_key) {
                    return Err(RemapError::AmbiguousMethod {
                        class: source_name.clone(),
                        target: format!("{mapped_name}{mapped_descriptor}"),
                        first: format!("{}{}", previous, key.descriptor),
                        second: format!("{}{}", key.name, key.descriptor),
                    });
                }
                reversed.methods.insert(reversed_key, key.name.clone());
            }
            for (field_name, mapped_name) in &rename.fields {
                if let Some(previous) = reversed.fields.get(mapped_name) {
                    return Err(RemapError::AmbiguousField {
                        class: source_name.clone(),
                        target: mapped_name.clone(),
                        first: previous.clone(),
                        second: field_name.clone(),
                    });
                }
                reversed.fields.insert(mapped_name.clone(), field_name.clone());
            }
        }
        Ok(out)
    }
}
