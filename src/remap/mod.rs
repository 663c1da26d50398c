//! Namespace remapping: rewrite every identifier of a mapping set using an
//! externally supplied rename table.
//!
//! Documentation and parameter indices migrate unchanged; identifiers with
//! no table entry pass through verbatim, so a partial table never loses
//! data.

mod descriptor;
mod table;

pub use table::{ClassRename, RenameTable};

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{MappingSet, MappingSetBuilder, MemberKey};

/// Which way to apply a [`RenameTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source namespace to target namespace, as the table is stored.
    Forward,
    /// Target namespace back to source namespace.
    Backward,
}

/// Input-validation failure of a rename table.
///
/// Reported before any output container is produced; an ambiguous table is
/// never silently resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    /// Two source classes map to the same target class.
    #[error("classes `{first}` and `{second}` both map to `{target}`")]
    AmbiguousClass {
        /// Contested target class name.
        target: String,
        /// First source class claiming the target.
        first: String,
        /// Second source class claiming the target.
        second: String,
    },
    /// Two source methods in one class map to the same target signature.
    #[error("methods `{first}` and `{second}` in `{class}` both map to `{target}`")]
    AmbiguousMethod {
        /// Owning class (source namespace).
        class: String,
        /// Contested target name and descriptor.
        target: String,
        /// First source method claiming the target.
        first: String,
        /// Second source method claiming the target.
        second: String,
    },
    /// Two source fields in one class map to the same target name.
    #[error("fields `{first}` and `{second}` in `{class}` both map to `{target}`")]
    AmbiguousField {
        /// Owning class (source namespace).
        class: String,
        /// Contested target field name.
        target: String,
        /// First source field claiming the target.
        first: String,
        /// Second source field claiming the target.
        second: String,
    },
}

/// Produces a new set with every class, method, and field identifier
/// translated through `table` in the given direction.
///
/// Method descriptors (and tracked field descriptors) are rewritten against
/// the class renames so that type references stay consistent. Package
/// entries pass through unchanged; run [`construct_package_data`] afterwards
/// to derive packages for the new class names.
///
/// # Errors
///
/// Returns a [`RemapError`] when the table collapses two distinct source
/// identifiers onto one target identifier within the same scope.
pub fn remap(
    set: &MappingSet,
    table: &RenameTable,
    direction: Direction,
) -> Result<MappingSet, RemapError> {
    match direction {
        Direction::Forward => remap_forward(set, table),
        Direction::Backward => remap_forward(set, &table.reversed()?),
    }
}

fn remap_forward(set: &MappingSet, table: &RenameTable) -> Result<MappingSet, RemapError> {
    let mut builder = MappingSetBuilder::new();

    for package in set.packages() {
        builder.create_package(package.name()).add_javadoc(package.javadoc().iter().cloned());
    }

    // target -> source, for reporting both halves of a collision.
    let mut seen_classes: IndexMap<&str, &str> = IndexMap::new();

    for class in set.classes() {
        let new_name = table.class_target(class.name()).unwrap_or(class.name());
        if let Some(first) = seen_classes.insert(new_name, class.name()) {
            return Err(RemapError::AmbiguousClass {
                target: new_name.to_string(),
                first: first.to_string(),
                second: class.name().to_string(),
            });
        }

        let mut seen_fields: IndexMap<&str, &str> = IndexMap::new();
        let mut seen_methods: IndexMap<MemberKey, MemberKey> = IndexMap::new();

        let out = builder.create_class(new_name);
        out.add_javadoc(class.javadoc().iter().cloned());

        for field in class.fields() {
            let field_name =
                table.field_target(class.name(), field.name()).unwrap_or(field.name());
            if let Some(first) = seen_fields.insert(field_name, field.name()) {
                return Err(RemapError::AmbiguousField {
                    class: class.name().to_string(),
                    target: field_name.to_string(),
                    first: first.to_string(),
                    second: field.name().to_string(),
                });
            }
            let new_field = out.create_field(field_name);
            if let Some(desc) = field.descriptor() {
                new_field.set_descriptor(descriptor::remap_descriptor(desc, table));
            }
            new_field.add_javadoc(field.javadoc().iter().cloned());
        }

        for method in class.methods() {
            let method_name = table
                .method_target(class.name(), method.name(), method.descriptor())
                .unwrap_or(method.name());
            let method_desc = descriptor::remap_descriptor(method.descriptor(), table);
            let new_key = MemberKey::new(method_name, &method_desc);
            let source_key = MemberKey::new(method.name(), method.descriptor());
            if let Some(first) = seen_methods.insert(new_key, source_key) {
                return Err(RemapError::AmbiguousMethod {
                    class: class.name().to_string(),
                    target: format!("{method_name}{method_desc}"),
                    first: format!("{}{}", first.name, first.descriptor),
                    second: format!("{}{}", method.name(), method.descriptor()),
                });
            }
            let new_method = out.create_method(method_name, &method_desc);
            new_method.add_javadoc(method.javadoc().iter().cloned());
            for parameter in method.parameters() {
                let new_parameter = new_method.create_parameter(parameter.index());
                if let Some(name) = parameter.name() {
                    new_parameter.set_name(name);
                }
                new_parameter.add_javadoc(parameter.javadoc().iter().cloned());
            }
        }
    }

    Ok(builder.build())
}

/// Derives package entries from the class names present in `set`: one
/// package per distinct class-name prefix, converted from slash form to
/// dotted form. Existing package entries (and their documentation) are
/// kept; classes in the default package contribute nothing.
#[must_use]
pub fn construct_package_data(set: &MappingSet) -> MappingSet {
    let mut builder = MappingSetBuilder::copy_of(set);
    for class in set.classes() {
        if let Some(package) = package_of(class.name()) {
            builder.create_package(&package);
        }
    }
    builder.build()
}

fn package_of(class_name: &str) -> Option<String> {
    let (prefix, _) = class_name.rsplit_once('/')?;
    Some(prefix.replace('/', "."))
}
