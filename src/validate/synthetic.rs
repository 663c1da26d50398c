//! Rule: synthetic members must not be documented (or named, for
//! parameters of synthetic methods).

use super::{Issues, Validator};
use crate::metadata::{ClassMetadata, FieldMetadata, MethodMetadata};
use crate::model::{ClassData, FieldData, MethodData, ParameterData};

/// Flags names and documentation on compiler-generated members.
///
/// Synthetic status comes from metadata access flags only; there is no
/// naming heuristic that can guess it reliably, so without metadata the
/// rule stays silent. Lambda bodies are synthetic too but are the lambda
/// rule's business, so they are excluded here.
pub struct SyntheticValidator;

fn is_plain_synthetic(method_meta: Option<&MethodMetadata>) -> bool {
    method_meta.is_some_and(|meta| meta.is_synthetic() && !meta.is_lambda())
}

impl Validator for SyntheticValidator {
    fn name(&self) -> &'static str {
        "synthetic fields and methods"
    }

    fn check_method(
        &self,
        issues: &mut Issues,
        _class: &ClassData,
        method: &MethodData,
        _class_meta: Option<&ClassMetadata>,
        method_meta: Option<&MethodMetadata>,
    ) {
        if is_plain_synthetic(method_meta) && !method.javadoc().is_empty() {
            issues.error("synthetic method must not be documented");
        }
    }

    fn check_parameter(
        &self,
        issues: &mut Issues,
        _class: &ClassData,
        _method: &MethodData,
        parameter: &ParameterData,
        _class_meta: Option<&ClassMetadata>,
        method_meta: Option<&MethodMetadata>,
    ) {
        if is_plain_synthetic(method_meta) {
            if parameter.name().is_some() {
                issues.error("synthetic method parameter must not be named");
            }
            if !parameter.javadoc().is_empty() {
                issues.error("synthetic method parameter must not be documented");
            }
        }
    }

    fn check_field(
        &self,
        issues: &mut Issues,
        _class: &ClassData,
        field: &FieldData,
        _class_meta: Option<&ClassMetadata>,
        field_meta: Option<&FieldMetadata>,
    ) {
        if field_meta.is_some_and(FieldMetadata::is_synthetic) && !field.javadoc().is_empty() {
            issues.error("synthetic field must not be documented");
        }
    }
}
