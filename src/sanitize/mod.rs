//! Parameter-name sanitizing: clears names on synthetic constructs and
//! normalizes the rest with a configured prefix.
//!
//! Bytecode metadata, when supplied, decides lambda status
//! authoritatively; without it a `lambda$` name prefix marks a lambda and a
//! numeral-leading `$` segment marks an anonymous class. Documentation is
//! never touched.

use crate::metadata::MetadataIndex;
use crate::model::{MappingSet, MappingSetBuilder};

/// Name prefix the JVM gives methods compiled from lambda bodies.
const LAMBDA_NAME_PREFIX: &str = "lambda$";

/// Controls how [`sanitize`] treats parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Prefix applied to kept parameter names, e.g. `p` + `Name`.
    pub parameter_prefix: String,
    /// Clear names of parameters belonging to lambda methods.
    pub skip_lambda_parameters: bool,
    /// Clear names of parameters in (or nested in) anonymous classes.
    pub skip_anonymous_class_parameters: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            parameter_prefix: "p".to_string(),
            skip_lambda_parameters: true,
            skip_anonymous_class_parameters: true,
        }
    }
}

/// Rewrites or clears every named method parameter in `set`.
///
/// Parameters in skipped methods (lambdas, anonymous classes, per
/// `options`) lose their names; every other named parameter becomes
/// `prefix + Titlecase(name)`. Names already carrying the prefix and an
/// upper-case first letter are left alone, so the pass is idempotent.
/// Unnamed parameters stay unnamed.
#[must_use]
pub fn sanitize(
    set: &MappingSet,
    metadata: Option<&MetadataIndex>,
    options: &SanitizeOptions,
) -> MappingSet {
    let mut builder = MappingSetBuilder::copy_of(set);

    for class in builder.classes_mut() {
        let class_meta = metadata.and_then(|index| index.class(class.name()));
        let anonymous = within_anonymous_class(class.name());

        for method in class.methods_mut() {
            let method_meta =
                class_meta.and_then(|meta| meta.method(method.name(), method.descriptor()));
            // Metadata is authoritative when present; otherwise the name
            // prefix heuristic decides.
            let lambda = match method_meta {
                Some(meta) => meta.is_lambda(),
                None => method.name().starts_with(LAMBDA_NAME_PREFIX),
            };
            let clear = (options.skip_anonymous_class_parameters && anonymous)
                || (options.skip_lambda_parameters && lambda);

            for parameter in method.parameters_mut() {
                if parameter.name().is_none() {
                    continue;
                }
                if clear {
                    parameter.clear_name();
                } else if let Some(name) = parameter.name().map(ToOwned::to_owned) {
                    if !already_prefixed(&name, &options.parameter_prefix) {
                        parameter
                            .set_name(format!("{}{}", options.parameter_prefix, titlecase(&name)));
                    }
                }
            }
        }
    }

    builder.build()
}

/// `true` when any `$`-delimited segment of the class identifier starts
/// with a numeral-like code point. Class names must start with an
/// identifier letter, so a leading digit or letter-number marks an
/// anonymous (or at least compiler-generated) class.
fn within_anonymous_class(class_name: &str) -> bool {
    class_name
        .split('$')
        .filter_map(|segment| segment.chars().next())
        .any(char::is_numeric)
}

/// Upper-cases only the first code point.
fn titlecase(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A name that already starts with the prefix followed by an upper-case
/// code point has been through the pass before.
fn already_prefixed(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AccessFlags, ClassMetadata, MethodMetadata};

    fn set_with_parameter(class: &str, method: &str, name: &str) -> MappingSet {
        let mut builder = MappingSetBuilder::new();
        builder
            .create_class(class)
            .create_method(method, "(I)V")
            .create_parameter(0)
            .set_name(name);
        builder.build()
    }

    #[test]
    fn plain_parameters_get_prefixed_and_capitalized() {
        let set = set_with_parameter("com/example/Widget", "resize", "width");
        let out = sanitize(&set, None, &SanitizeOptions::default());
        let parameter = out
            .class("com/example/Widget")
            .and_then(|c| c.method("resize", "(I)V"))
            .and_then(|m| m.parameter(0))
            .unwrap();
        assert_eq!(parameter.name(), Some("pWidth"));
    }

    #[test]
    fn lambda_heuristic_clears_names_without_metadata() {
        let set = set_with_parameter("com/example/Widget", "lambda$run$0", "x");
        let out = sanitize(&set, None, &SanitizeOptions::default());
        let parameter = out
            .class("com/example/Widget")
            .and_then(|c| c.method("lambda$run$0", "(I)V"))
            .and_then(|m| m.parameter(0))
            .unwrap();
        assert_eq!(parameter.name(), None);
    }

    #[test]
    fn metadata_overrides_the_name_heuristic() {
        // Named like a lambda but metadata says otherwise.
        let set = set_with_parameter("com/example/Widget", "lambda$run$0", "x");
        let mut index = MetadataIndex::new();
        let mut class = ClassMetadata::new("com/example/Widget", AccessFlags::PUBLIC);
        class.methods.push(MethodMetadata {
            name: "lambda$run$0".to_string(),
            descriptor: "(I)V".to_string(),
            access: AccessFlags::PUBLIC,
            lambda: false,
        });
        index.insert(class);

        let out = sanitize(&set, Some(&index), &SanitizeOptions::default());
        let parameter = out
            .class("com/example/Widget")
            .and_then(|c| c.method("lambda$run$0", "(I)V"))
            .and_then(|m| m.parameter(0))
            .unwrap();
        assert_eq!(parameter.name(), Some("pX"));
    }

    #[test]
    fn metadata_confirming_the_lambda_flag_clears_names() {
        let set = set_with_parameter("com/example/Widget", "lambda$run$0", "x");
        let mut index = MetadataIndex::new();
        let mut class = ClassMetadata::new("com/example/Widget", AccessFlags::PUBLIC);
        class.methods.push(MethodMetadata {
            name: "lambda$run$0".to_string(),
            descriptor: "(I)V".to_string(),
            access: AccessFlags::SYNTHETIC,
            lambda: true,
        });
        index.insert(class);

        let out = sanitize(&set, Some(&index), &SanitizeOptions::default());
        let parameter = out
            .class("com/example/Widget")
            .and_then(|c| c.method("lambda$run$0", "(I)V"))
            .and_then(|m| m.parameter(0))
            .unwrap();
        assert_eq!(parameter.name(), None);
    }

    #[test]
    fn anonymous_class_parameters_are_cleared() {
        let set = set_with_parameter("com/example/Outer$1", "accept", "value");
        let out = sanitize(&set, None, &SanitizeOptions::default());
        let parameter = out
            .class("com/example/Outer$1")
            .and_then(|c| c.method("accept", "(I)V"))
            .and_then(|m| m.parameter(0))
            .unwrap();
        assert_eq!(parameter.name(), None);
    }

    #[test]
    fn unnamed_parameters_stay_unnamed() {
        let mut builder = MappingSetBuilder::new();
        builder.create_class("a/B").create_method("m", "(I)V").create_parameter(0);
        let set = builder.build();
        let out = sanitize(&set, None, &SanitizeOptions::default());
        let parameter =
            out.class("a/B").and_then(|c| c.method("m", "(I)V")).and_then(|m| m.parameter(0));
        assert_eq!(parameter.unwrap().name(), None);
    }

    #[test]
    fn sanitizing_twice_equals_sanitizing_once() {
        let set = set_with_parameter("com/example/Widget", "resize", "width");
        let options = SanitizeOptions::default();
        let once = sanitize(&set, None, &options);
        let twice = sanitize(&once, None, &options);
        assert_eq!(once, twice);
    }

    #[test]
    fn documentation_is_never_touched() {
        let mut builder = MappingSetBuilder::new();
        let method = builder.create_class("com/example/Outer$1").create_method("m", "(I)V");
        method.add_javadoc(["Method doc."]);
        let parameter = method.create_parameter(0);
        parameter.set_name("x");
        parameter.add_javadoc(["Param doc."]);
        let set = builder.build();

        let out = sanitize(&set, None, &SanitizeOptions::default());
        let method = out.class("com/example/Outer$1").and_then(|c| c.method("m", "(I)V")).unwrap();
        assert_eq!(method.javadoc(), ["Method doc."]);
        let parameter = method.parameter(0).unwrap();
        assert_eq!(parameter.name(), None);
        assert_eq!(parameter.javadoc(), ["Param doc."]);
    }

    #[test]
    fn anonymous_heuristic_on_segments() {
        assert!(within_anonymous_class("Outer$1"));
        assert!(within_anonymous_class("com/example/Outer$1$Inner"));
        assert!(!within_anonymous_class("Outer$Inner"));
        assert!(!within_anonymous_class("com/example/Widget"));
        // Empty segments are skipped rather than treated as anonymous.
        assert!(!within_anonymous_class("Odd$$Name"));
    }

    #[test]
    fn titlecase_upper_cases_first_code_point_only() {
        assert_eq!(titlecase("width"), "Width");
        assert_eq!(titlecase("WIDTH"), "WIDTH");
        assert_eq!(titlecase(""), "");
    }
}
