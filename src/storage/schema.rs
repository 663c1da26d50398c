//! On-disk schema shared by both codecs: plain serde entry types plus
//! conversions to and from the in-memory model.
//!
//! Decoding validates what the model's get-or-create builder would
//! silently merge: duplicate identifiers in stored content are malformed
//! input, not data to be coalesced.

use serde::{Deserialize, Serialize};

use crate::model::{ClassData, FieldData, MappingSet, MappingSetBuilder, MethodData, PackageData};

/// Schema version written into every document and index.
pub(crate) const FORMAT_VERSION: &str = "1.0.0";

/// Major version this build can read.
pub(crate) const SUPPORTED_MAJOR: u32 = 1;

/// `true` when the declared version has a major component we understand.
pub(crate) fn supported_version(version: &str) -> bool {
    version
        .split('.')
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .is_some_and(|major| major == SUPPORTED_MAJOR)
}

/// The Single-Document form: the whole set as one ordered document.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MappingDocument {
    pub version: String,
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PackageEntry {
    pub name: String,
    #[serde(default)]
    pub javadoc: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub javadoc: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FieldEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    #[serde(default)]
    pub javadoc: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MethodEntry {
    pub name: String,
    pub descriptor: String,
    #[serde(default)]
    pub javadoc: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ParameterEntry {
    pub index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub javadoc: Vec<String>,
}

pub(crate) fn package_entry(package: &PackageData) -> PackageEntry {
    PackageEntry { name: package.name().to_string(), javadoc: package.javadoc().to_vec() }
}

pub(crate) fn class_entry(class: &ClassData) -> ClassEntry {
    ClassEntry {
        name: class.name().to_string(),
        javadoc: class.javadoc().to_vec(),
        fields: class.fields().map(field_entry).collect(),
        methods: class.methods().map(method_entry).collect(),
    }
}

fn field_entry(field: &FieldData) -> FieldEntry {
    FieldEntry {
        name: field.name().to_string(),
        descriptor: field.descriptor().map(str::to_string),
        javadoc: field.javadoc().to_vec(),
    }
}

fn method_entry(method: &MethodData) -> MethodEntry {
    MethodEntry {
        name: method.name().to_string(),
        descriptor: method.descriptor().to_string(),
        javadoc: method.javadoc().to_vec(),
        parameters: method
            .parameters()
            .map(|parameter| ParameterEntry {
                index: parameter.index(),
                name: parameter.name().map(str::to_string),
                javadoc: parameter.javadoc().to_vec(),
            })
            .collect(),
    }
}

/// Sorts a class entry's members by identifier, for the Exploded codec's
/// normalized on-disk form.
pub(crate) fn sort_class_entry(entry: &mut ClassEntry) {
    entry.fields.sort_by(|a, b| a.name.cmp(&b.name));
    entry.methods.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.descriptor.cmp(&b.descriptor)));
    for method in &mut entry.methods {
        method.parameters.sort_by_key(|parameter| parameter.index);
    }
}

pub(crate) fn document_from_set(set: &MappingSet) -> MappingDocument {
    MappingDocument {
        version: FORMAT_VERSION.to_string(),
        packages: set.packages().map(package_entry).collect(),
        classes: set.classes().map(class_entry).collect(),
    }
}

/// Rebuilds a set from a decoded document. The version field must already
/// have been checked by the caller.
pub(crate) fn set_from_document(document: MappingDocument) -> Result<MappingSet, String> {
    let mut builder = MappingSetBuilder::new();
    for package in document.packages {
        add_package_entry(&mut builder, package)?;
    }
    for class in document.classes {
        add_class_entry(&mut builder, class)?;
    }
    Ok(builder.build())
}

pub(crate) fn add_package_entry(
    builder: &mut MappingSetBuilder,
    entry: PackageEntry,
) -> Result<(), String> {
    if builder.package(&entry.name).is_some() {
        return Err(format!("duplicate package `{}`", entry.name));
    }
    builder.create_package(&entry.name).add_javadoc(entry.javadoc);
    Ok(())
}

pub(crate) fn add_class_entry(
    builder: &mut MappingSetBuilder,
    entry: ClassEntry,
) -> Result<(), String> {
    if builder.class(&entry.name).is_some() {
        return Err(format!("duplicate class `{}`", entry.name));
    }
    let class = builder.create_class(&entry.name);
    class.add_javadoc(entry.javadoc);

    for field in entry.fields {
        if class.field(&field.name).is_some() {
            return Err(format!("duplicate field `{}` in `{}`", field.name, entry.name));
        }
        let new_field = class.create_field(&field.name);
        if let Some(descriptor) = field.descriptor {
            new_field.set_descriptor(descriptor);
        }
        new_field.add_javadoc(field.javadoc);
    }

    for method in entry.methods {
        if class.method(&method.name, &method.descriptor).is_some() {
            return Err(format!(
                "duplicate method `{}{}` in `{}`",
                method.name, method.descriptor, entry.name
            ));
        }
        let new_method = class.create_method(&method.name, &method.descriptor);
        new_method.add_javadoc(method.javadoc);
        for parameter in method.parameters {
            if new_method.parameter(parameter.index).is_some() {
                return Err(format!(
                    "duplicate parameter index {} in `{}#{}{}`",
                    parameter.index, entry.name, method.name, method.descriptor
                ));
            }
            let new_parameter = new_method.create_parameter(parameter.index);
            if let Some(name) = parameter.name {
                new_parameter.set_name(name);
            }
            new_parameter.add_javadoc(parameter.javadoc);
        }
    }
    Ok(())
}
