//! Rule: lambda methods and their parameters must not be documented.

use super::{Issues, Validator};
use crate::metadata::{ClassMetadata, MethodMetadata};
use crate::model::{ClassData, MethodData, ParameterData};

const LAMBDA_METHOD_NAME_PREFIX: &str = "lambda$";

/// Flags documentation on compiler-synthesized lambda bodies.
///
/// A method counts as a lambda when its name carries the `lambda$` marker
/// and metadata, if present, confirms the lambda flag. Parameter *names*
/// are fine; only documentation is rejected.
pub struct LambdaValidator;

fn is_lambda(method: &MethodData, method_meta: Option<&MethodMetadata>) -> bool {
    method.name().starts_with(LAMBDA_METHOD_NAME_PREFIX)
        && method_meta.is_none_or(MethodMetadata::is_lambda)
}

impl Validator for LambdaValidator {
    fn name(&self) -> &'static str {
        "lambda methods"
    }

    fn check_method(
        &self,
        issues: &mut Issues,
        _class: &ClassData,
        method: &MethodData,
        _class_meta: Option<&ClassMetadata>,
        method_meta: Option<&MethodMetadata>,
    ) {
        if is_lambda(method, method_meta) && !method.javadoc().is_empty() {
            issues.error("lambda method must not be documented");
        }
    }

    fn check_parameter(
        &self,
        issues: &mut Issues,
        _class: &ClassData,
        method: &MethodData,
        parameter: &ParameterData,
        _class_meta: Option<&ClassMetadata>,
        method_meta: Option<&MethodMetadata>,
    ) {
        if is_lambda(method, method_meta) && !parameter.javadoc().is_empty() {
            issues.error("lambda method parameter must not be documented");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AccessFlags, MetadataIndex};
    use crate::model::MappingSetBuilder;
    use crate::validate::{run, Severity};

    fn validators() -> Vec<Box<dyn Validator>> {
        vec![Box::new(LambdaValidator)]
    }

    #[test]
    fn documented_lambda_method_is_an_error() {
        let mut builder = MappingSetBuilder::new();
        builder.create_class("a/B").create_method("lambda$run$0", "(I)V").add_javadoc(["Doc."]);
        let set = builder.build();

        let issues = run(&set, None, &validators());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].message, "lambda method must not be documented");
    }

    #[test]
    fn documented_lambda_parameter_is_an_error() {
        let mut builder = MappingSetBuilder::new();
        builder
            .create_class("a/B")
            .create_method("lambda$run$0", "(I)V")
            .create_parameter(0)
            .add_javadoc(["Doc."]);
        let set = builder.build();

        let issues = run(&set, None, &validators());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.parameter, Some(0));
    }

    #[test]
    fn named_but_undocumented_lambda_parameter_is_fine() {
        let mut builder = MappingSetBuilder::new();
        builder
            .create_class("a/B")
            .create_method("lambda$run$0", "(I)V")
            .create_parameter(0)
            .set_name("x");
        let set = builder.build();

        assert!(run(&set, None, &validators()).is_empty());
    }

    #[test]
    fn metadata_confirming_the_lambda_flag_keeps_the_error() {
        let mut builder = MappingSetBuilder::new();
        builder.create_class("a/B").create_method("lambda$run$0", "(I)V").add_javadoc(["Doc."]);
        let set = builder.build();

        let mut index = MetadataIndex::new();
        let mut class = crate::metadata::ClassMetadata::new("a/B", AccessFlags::PUBLIC);
        class.methods.push(crate::metadata::MethodMetadata {
            name: "lambda$run$0".to_string(),
            descriptor: "(I)V".to_string(),
            access: AccessFlags::SYNTHETIC,
            lambda: true,
        });
        index.insert(class);

        let issues = run(&set, Some(&index), &validators());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "lambda method must not be documented");
    }

    #[test]
    fn metadata_denying_the_lambda_flag_silences_the_rule() {
        let mut builder = MappingSetBuilder::new();
        builder.create_class("a/B").create_method("lambda$run$0", "(I)V").add_javadoc(["Doc."]);
        let set = builder.build();

        let mut index = MetadataIndex::new();
        let mut class = crate::metadata::ClassMetadata::new("a/B", AccessFlags::PUBLIC);
        class.methods.push(crate::metadata::MethodMetadata {
            name: "lambda$run$0".to_string(),
            descriptor: "(I)V".to_string(),
            access: AccessFlags::PUBLIC,
            lambda: false,
        });
        index.insert(class);

        assert!(run(&set, Some(&index), &validators()).is_empty());
    }

    #[test]
    fn ordinary_methods_are_ignored() {
        let mut builder = MappingSetBuilder::new();
        builder.create_class("a/B").create_method("run", "()V").add_javadoc(["Doc."]);
        let set = builder.build();

        assert!(run(&set, None, &validators()).is_empty());
    }
}
