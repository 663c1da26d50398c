//! Mapping data model: packages, classes, members, and parameters.
//!
//! A [`MappingSet`] is the immutable value form of one namespace's worth of
//! names and documentation. It is produced once per pipeline stage (read
//! from storage, remapped, or sanitized) and only ever mutated through a
//! [`MappingSetBuilder`].

mod builder;

pub use builder::MappingSetBuilder;

use indexmap::IndexMap;

/// Lookup key for a method within its owning class.
///
/// Methods are unique by name *and* descriptor; overloads share a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MemberKey {
    pub(crate) name: String,
    pub(crate) descriptor: String,
}

impl MemberKey {
    pub(crate) fn new(name: &str, descriptor: &str) -> Self {
        Self { name: name.to_string(), descriptor: descriptor.to_string() }
    }
}

/// Immutable container of mapping data for one namespace.
///
/// Packages are keyed by dotted package path, classes by slash-separated
/// internal name (nested classes via `$`). Insertion order is preserved and
/// observable through the iterators, but equality is structural and
/// order-insensitive: two sets with the same entries in different order
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
    pub(crate) packages: IndexMap<String, PackageData>,
    pub(crate) classes: IndexMap<String, ClassData>,
}

impl MappingSet {
    /// Returns a set with no packages and no classes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the set holds no packages and no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.classes.is_empty()
    }

    /// Number of packages in the set.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Number of classes in the set.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Iterates packages in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = &PackageData> {
        self.packages.values()
    }

    /// Iterates classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassData> {
        self.classes.values()
    }

    /// Looks up a package by its dotted path. Absence is a normal outcome.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageData> {
        self.packages.get(name)
    }

    /// Looks up a class by its internal name. Absence is a normal outcome.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassData> {
        self.classes.get(name)
    }
}

/// Documentation attached to a single package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageData {
    name: String,
    javadoc: Vec<String>,
}

impl PackageData {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.to_string(), javadoc: Vec::new() }
    }

    /// Dotted package path, e.g. `com.example.util`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation lines, in order.
    #[must_use]
    pub fn javadoc(&self) -> &[String] {
        &self.javadoc
    }

    /// Appends documentation lines.
    pub fn add_javadoc<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.javadoc.extend(lines.into_iter().map(Into::into));
    }
}

/// One class and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassData {
    name: String,
    javadoc: Vec<String>,
    fields: IndexMap<String, FieldData>,
    methods: IndexMap<MemberKey, MethodData>,
}

impl ClassData {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            javadoc: Vec::new(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    /// Slash-separated internal name, e.g. `com/example/Outer$Inner`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documentation lines, in order.
    #[must_use]
    pub fn javadoc(&self) -> &[String] {
        &self.javadoc
    }

    /// Appends documentation lines.
    pub fn add_javadoc<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.javadoc.extend(lines.into_iter().map(Into::into));
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldData> {
        self.fields.values()
    }

    /// Iterates methods in insertion order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodData> {
        self.methods.values()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldData> {
        self.fields.get(name)
    }

    /// Looks up a method by name and descriptor.
    #[must_use]
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodData> {
        self.methods.get(&MemberKey::new(name, descriptor))
    }

    /// Returns the field with the given name, creating it if absent.
    pub fn create_field(&mut self, name: &str) -> &mut FieldData {
        self.fields.entry(name.to_string()).or_insert_with(|| FieldData::new(name))
    }

    /// Returns the method with the given name and descriptor, creating it
    /// if absent.
    pub fn create_method(&mut self, name: &str, descriptor: &str) -> &mut MethodData {
        self.methods
            .entry(MemberKey::new(name, descriptor))
            .or_insert_with(|| MethodData::new(name, descriptor))
    }

    /// Iterates methods mutably, in insertion order.
    pub fn methods_mut(&mut self) -> impl Iterator<Item = &mut MethodData> {
        self.methods.values_mut()
    }
}

/// One field of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldData {
    name: String,
    descriptor: Option<String>,
    javadoc: Vec<String>,
}

impl FieldData {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.to_string(), descriptor: None, javadoc: Vec::new() }
    }

    /// Field name, unique within its class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type descriptor, tracked only when known (fields in source-level
    /// mappings are unique by name alone).
    #[must_use]
    pub fn descriptor(&self) -> Option<&str> {
        self.descriptor.as_deref()
    }

    /// Records the field's type descriptor.
    pub fn set_descriptor(&mut self, descriptor: impl Into<String>) {
        self.descriptor = Some(descriptor.into());
    }

    /// Documentation lines, in order.
    #[must_use]
    pub fn javadoc(&self) -> &[String] {
        &self.javadoc
    }

    /// Appends documentation lines.
    pub fn add_javadoc<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.javadoc.extend(lines.into_iter().map(Into::into));
    }
}

/// One method of a class, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodData {
    name: String,
    descriptor: String,
    javadoc: Vec<String>,
    parameters: IndexMap<u8, ParameterData>,
}

impl MethodData {
    pub(crate) fn new(name: &str, descriptor: &str) -> Self {
        Self {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            javadoc: Vec::new(),
            parameters: IndexMap::new(),
        }
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// JVM method descriptor, e.g. `(ILjava/lang/String;)V`.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Documentation lines, in order.
    #[must_use]
    pub fn javadoc(&self) -> &[String] {
        &self.javadoc
    }

    /// Appends documentation lines.
    pub fn add_javadoc<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.javadoc.extend(lines.into_iter().map(Into::into));
    }

    /// Iterates parameters in insertion order.
    pub fn parameters(&self) -> impl Iterator<Item = &ParameterData> {
        self.parameters.values()
    }

    /// Iterates parameters mutably, in insertion order.
    pub fn parameters_mut(&mut self) -> impl Iterator<Item = &mut ParameterData> {
        self.parameters.values_mut()
    }

    /// Looks up a parameter by its zero-based index.
    #[must_use]
    pub fn parameter(&self, index: u8) -> Option<&ParameterData> {
        self.parameters.get(&index)
    }

    /// Returns the parameter at the given index, creating it if absent.
    ///
    /// The index counts only parameters present in the descriptor, not
    /// synthetic receiver slots.
    pub fn create_parameter(&mut self, index: u8) -> &mut ParameterData {
        self.parameters.entry(index).or_insert_with(|| ParameterData::new(index))
    }
}

/// One parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterData {
    index: u8,
    name: Option<String>,
    javadoc: Vec<String>,
}

impl ParameterData {
    pub(crate) fn new(index: u8) -> Self {
        Self { index, name: None, javadoc: Vec::new() }
    }

    /// Zero-based parameter index.
    #[must_use]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Display name override, if one has been assigned.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Assigns a display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Removes the display name, leaving the parameter unnamed.
    pub fn clear_name(&mut self) {
        self.name = None;
    }

    /// Documentation lines, in order.
    #[must_use]
    pub fn javadoc(&self) -> &[String] {
        &self.javadoc
    }

    /// Appends documentation lines.
    pub fn add_javadoc<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.javadoc.extend(lines.into_iter().map(Into::into));
    }
}
