//! Auxiliary bytecode metadata consumed by the sanitizer and validators.
//!
//! The index is supplied by an external collaborator (already materialized
//! in memory) and is entirely optional: every consumer handles an absent
//! index, class, or member entry as a normal outcome.

use bitflags::bitflags;
use indexmap::IndexMap;

bitflags! {
    /// JVM access word for a class, method, or field.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct AccessFlags: u32 {
        /// `ACC_PUBLIC`
        const PUBLIC = 0x0001;
        /// `ACC_PRIVATE`
        const PRIVATE = 0x0002;
        /// `ACC_PROTECTED`
        const PROTECTED = 0x0004;
        /// `ACC_STATIC`
        const STATIC = 0x0008;
        /// `ACC_FINAL`
        const FINAL = 0x0010;
        /// `ACC_BRIDGE` (methods only)
        const BRIDGE = 0x0040;
        /// `ACC_SYNTHETIC` — compiler-generated, not present in source.
        const SYNTHETIC = 0x1000;
        /// `ACC_ENUM`
        const ENUM = 0x4000;
    }
}

/// Read-only lookup from class name to [`ClassMetadata`].
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    classes: IndexMap<String, ClassMetadata>,
}

impl MetadataIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class entry, replacing any existing entry with the same name.
    pub fn insert(&mut self, class: ClassMetadata) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Looks up metadata for a class by internal name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassMetadata> {
        self.classes.get(name)
    }
}

/// Structural facts about one class.
#[derive(Debug, Clone)]
pub struct ClassMetadata {
    /// Slash-separated internal class name.
    pub name: String,
    /// Access word of the class itself.
    pub access: AccessFlags,
    /// Known methods of the class.
    pub methods: Vec<MethodMetadata>,
    /// Known fields of the class.
    pub fields: Vec<FieldMetadata>,
}

impl ClassMetadata {
    /// Creates an entry with no members.
    #[must_use]
    pub fn new(name: &str, access: AccessFlags) -> Self {
        Self { name: name.to_string(), access, methods: Vec::new(), fields: Vec::new() }
    }

    /// Looks up a method entry by name and descriptor.
    #[must_use]
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodMetadata> {
        self.methods.iter().find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Looks up a field entry by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Structural facts about one method.
#[derive(Debug, Clone)]
pub struct MethodMetadata {
    /// Method name.
    pub name: String,
    /// JVM method descriptor.
    pub descriptor: String,
    /// Access word of the method.
    pub access: AccessFlags,
    /// `true` when the method implements a lambda body.
    pub lambda: bool,
}

impl MethodMetadata {
    /// `true` when the method implements a lambda body.
    #[must_use]
    pub fn is_lambda(&self) -> bool {
        self.lambda
    }

    /// `true` when the access word carries `ACC_SYNTHETIC`.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.access.contains(AccessFlags::SYNTHETIC)
    }
}

/// Structural facts about one field.
#[derive(Debug, Clone)]
pub struct FieldMetadata {
    /// Field name.
    pub name: String,
    /// Access word of the field.
    pub access: AccessFlags,
}

impl FieldMetadata {
    /// `true` when the access word carries `ACC_SYNTHETIC`.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.access.contains(AccessFlags::SYNTHETIC)
    }
}
