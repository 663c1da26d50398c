//! Mutable construction form of a [`MappingSet`].

use indexmap::IndexMap;

use super::{ClassData, MappingSet, PackageData};

/// Mutable scratchpad for assembling a [`MappingSet`].
///
/// The builder is the only mutable form of the model: build once, freeze
/// with [`build`](Self::build), and pass the resulting set by shared
/// reference thereafter. Builders are never shared across pipeline stages.
///
/// All `create_*` operations are get-or-create, keyed strictly by
/// identifier, and therefore idempotent.
#[derive(Debug, Clone, Default)]
pub struct MappingSetBuilder {
    packages: IndexMap<String, PackageData>,
    classes: IndexMap<String, ClassData>,
}

impl MappingSetBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding a full deep copy of `set`.
    ///
    /// No mutable state is aliased with the source set; mutating the
    /// builder never affects `set`.
    #[must_use]
    pub fn copy_of(set: &MappingSet) -> Self {
        Self { packages: set.packages.clone(), classes: set.classes.clone() }
    }

    /// Returns the package with the given dotted path, creating it if
    /// absent.
    pub fn create_package(&mut self, name: &str) -> &mut PackageData {
        self.packages.entry(name.to_string()).or_insert_with(|| PackageData::new(name))
    }

    /// Returns the class with the given internal name, creating it if
    /// absent.
    pub fn create_class(&mut self, name: &str) -> &mut ClassData {
        self.classes.entry(name.to_string()).or_insert_with(|| ClassData::new(name))
    }

    /// Looks up an existing package without creating it.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageData> {
        self.packages.get(name)
    }

    /// Looks up an existing class without creating it.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassData> {
        self.classes.get(name)
    }

    /// Iterates classes mutably, in insertion order.
    pub fn classes_mut(&mut self) -> impl Iterator<Item = &mut ClassData> {
        self.classes.values_mut()
    }

    /// Freezes the builder into an immutable [`MappingSet`].
    #[must_use]
    pub fn build(self) -> MappingSet {
        MappingSet { packages: self.packages, classes: self.classes }
    }
}
