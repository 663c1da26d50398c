//! Validation engine: runs pluggable rules over every class, method,
//! field, and parameter of a mapping set and collects an ordered issue
//! report.
//!
//! The engine is a read-only pass. Issues are its designed output, not
//! errors: it never aborts early, and it never mutates the container.

mod lambda;
mod synthetic;

pub use lambda::LambdaValidator;
pub use synthetic::SyntheticValidator;

use std::fmt;

use crate::metadata::{ClassMetadata, FieldMetadata, MetadataIndex, MethodMetadata};
use crate::model::{ClassData, FieldData, MappingSet, MethodData, ParameterData};

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Questionable but acceptable.
    Warning,
    /// Must be fixed before the data is publishable.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Where in the container an issue was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePath {
    /// Internal name of the owning class.
    pub class: String,
    /// Member within the class, when the issue is member-scoped.
    pub member: Option<MemberRef>,
    /// Parameter index, when the issue is parameter-scoped.
    pub parameter: Option<u8>,
}

/// A method or field reference inside an [`IssuePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberRef {
    /// A method, identified by name and descriptor.
    Method {
        /// Method name.
        name: String,
        /// JVM method descriptor.
        descriptor: String,
    },
    /// A field, identified by name.
    Field {
        /// Field name.
        name: String,
    },
}

impl fmt::Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class)?;
        match &self.member {
            Some(MemberRef::Method { name, descriptor }) => write!(f, "#{name}{descriptor}")?,
            Some(MemberRef::Field { name }) => write!(f, "#{name}")?,
            None => {}
        }
        if let Some(index) = self.parameter {
            write!(f, " param {index}")?;
        }
        Ok(())
    }
}

impl IssuePath {
    fn class(class: &ClassData) -> Self {
        Self { class: class.name().to_string(), member: None, parameter: None }
    }

    fn method(class: &ClassData, method: &MethodData) -> Self {
        Self {
            class: class.name().to_string(),
            member: Some(MemberRef::Method {
                name: method.name().to_string(),
                descriptor: method.descriptor().to_string(),
            }),
            parameter: None,
        }
    }

    fn parameter(class: &ClassData, method: &MethodData, parameter: &ParameterData) -> Self {
        Self { parameter: Some(parameter.index()), ..Self::method(class, method) }
    }

    fn field(class: &ClassData, field: &FieldData) -> Self {
        Self {
            class: class.name().to_string(),
            member: Some(MemberRef::Field { name: field.name().to_string() }),
            parameter: None,
        }
    }
}

/// One finding of a validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Name of the rule that raised the issue.
    pub rule: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Location of the offending entity.
    pub path: IssuePath,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] {} (at {})", self.severity, self.rule, self.message, self.path)
    }
}

/// Collects issues for the element currently being validated.
///
/// The engine stamps each recorded issue with the active rule name and
/// location, so rules only supply severity and message.
#[derive(Debug)]
pub struct Issues {
    records: Vec<ValidationIssue>,
    rule: String,
    path: IssuePath,
}

impl Issues {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            rule: String::new(),
            path: IssuePath { class: String::new(), member: None, parameter: None },
        }
    }

    fn set_context(&mut self, rule: &str, path: IssuePath) {
        self.rule = rule.to_string();
        self.path = path;
    }

    /// Records an error-severity issue at the current location.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    /// Records a warning-severity issue at the current location.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.records.push(ValidationIssue {
            rule: self.rule.clone(),
            severity,
            message,
            path: self.path.clone(),
        });
    }
}

/// A validation rule, polymorphic over four dispatch granularities.
///
/// Every hook defaults to a no-op; concrete rules implement only the
/// granularities they care about. Metadata arguments are `None` whenever no
/// matching entry was supplied, and every rule must treat that as normal.
pub trait Validator {
    /// Short human-readable rule name, used in issue reports.
    fn name(&self) -> &'static str;

    /// Checks one class.
    fn check_class(
        &self,
        issues: &mut Issues,
        class: &ClassData,
        class_meta: Option<&ClassMetadata>,
    ) {
        let _ = (issues, class, class_meta);
    }

    /// Checks one method of a class.
    fn check_method(
        &self,
        issues: &mut Issues,
        class: &ClassData,
        method: &MethodData,
        class_meta: Option<&ClassMetadata>,
        method_meta: Option<&MethodMetadata>,
    ) {
        let _ = (issues, class, method, class_meta, method_meta);
    }

    /// Checks one parameter of a method.
    fn check_parameter(
        &self,
        issues: &mut Issues,
        class: &ClassData,
        method: &MethodData,
        parameter: &ParameterData,
        class_meta: Option<&ClassMetadata>,
        method_meta: Option<&MethodMetadata>,
    ) {
        let _ = (issues, class, method, parameter, class_meta, method_meta);
    }

    /// Checks one field of a class.
    fn check_field(
        &self,
        issues: &mut Issues,
        class: &ClassData,
        field: &FieldData,
        class_meta: Option<&ClassMetadata>,
        field_meta: Option<&FieldMetadata>,
    ) {
        let _ = (issues, class, field, class_meta, field_meta);
    }
}

/// The built-in rule set: lambda and synthetic checks.
#[must_use]
pub fn default_validators() -> Vec<Box<dyn Validator>> {
    vec![Box::new(LambdaValidator), Box::new(SyntheticValidator)]
}

/// Runs every validator over every element of `set` and returns the
/// ordered issue list.
///
/// Dispatch order per class: class hooks, then per method (insertion
/// order) its method hooks followed by its parameter hooks in
/// parameter-index order, then per field its field hooks. Packages are not
/// validated. Metadata is matched by class name and member
/// (name, descriptor) lookups and passed along when found.
#[must_use]
pub fn run(
    set: &MappingSet,
    metadata: Option<&MetadataIndex>,
    validators: &[Box<dyn Validator>],
) -> Vec<ValidationIssue> {
    let mut issues = Issues::new();

    for class in set.classes() {
        let class_meta = metadata.and_then(|index| index.class(class.name()));

        for validator in validators {
            issues.set_context(validator.name(), IssuePath::class(class));
            validator.check_class(&mut issues, class, class_meta);
        }

        for method in class.methods() {
            let method_meta =
                class_meta.and_then(|meta| meta.method(method.name(), method.descriptor()));
            for validator in validators {
                issues.set_context(validator.name(), IssuePath::method(class, method));
                validator.check_method(&mut issues, class, method, class_meta, method_meta);
            }

            let mut parameters: Vec<&ParameterData> = method.parameters().collect();
            parameters.sort_by_key(|parameter| parameter.index());
            for parameter in parameters {
                for validator in validators {
                    issues.set_context(
                        validator.name(),
                        IssuePath::parameter(class, method, parameter),
                    );
                    validator.check_parameter(
                        &mut issues,
                        class,
                        method,
                        parameter,
                        class_meta,
                        method_meta,
                    );
                }
            }
        }

        for field in class.fields() {
            let field_meta = class_meta.and_then(|meta| meta.field(field.name()));
            for validator in validators {
                issues.set_context(validator.name(), IssuePath::field(class, field));
                validator.check_field(&mut issues, class, field, class_meta, field_meta);
            }
        }
    }

    tracing::debug!(
        classes = set.class_count(),
        issues = issues.records.len(),
        "validation pass finished"
    );

    issues.records
}
