//! End-to-end pipeline: remap, derive packages, sanitize, persist, read
//! back, and validate.

use sextant::metadata::{AccessFlags, ClassMetadata, MetadataIndex, MethodMetadata};
use sextant::model::{MappingSet, MappingSetBuilder};
use sextant::remap::{construct_package_data, remap, Direction, RenameTable};
use sextant::sanitize::{sanitize, SanitizeOptions};
use sextant::storage::{ExplodedCodec, MappingCodec, SingleFileCodec};
use sextant::validate::{default_validators, run, Severity};
use tempfile::TempDir;

/// Mappings authored against obfuscated names.
fn obfuscated_set() -> MappingSet {
    let mut builder = MappingSetBuilder::new();
    let class = builder.create_class("a");
    class.add_javadoc(["Handles window resize events."]);
    class.create_field("b").set_descriptor("I");
    let method = class.create_method("c", "(ILa;)V");
    method.add_javadoc(["Applies a resize."]);
    let parameter = method.create_parameter(0);
    parameter.set_name("newWidth");
    parameter.add_javadoc(["Width after the resize."]);
    method.create_parameter(1).set_name("source");
    builder.build()
}

fn rename_table() -> RenameTable {
    let mut table = RenameTable::new();
    let scope = table.map_class("a", "com/example/ResizeHandler");
    scope.map_field("b", "lastWidth");
    scope.map_method("c", "(ILa;)V", "apply");
    table
}

#[test]
fn remap_sanitize_store_and_validate() {
    let remapped = remap(&obfuscated_set(), &rename_table(), Direction::Forward).unwrap();
    let with_packages = construct_package_data(&remapped);
    assert!(with_packages.package("com.example").is_some());

    let clean = sanitize(&with_packages, None, &SanitizeOptions::default());
    let handler = clean.class("com/example/ResizeHandler").unwrap();
    let method = handler.method("apply", "(ILcom/example/ResizeHandler;)V").unwrap();
    assert_eq!(method.parameter(0).unwrap().name(), Some("pNewWidth"));
    assert_eq!(method.parameter(1).unwrap().name(), Some("pSource"));
    // Documentation survives every stage.
    assert_eq!(method.parameter(0).unwrap().javadoc(), ["Width after the resize."]);
    assert_eq!(handler.field("lastWidth").unwrap().descriptor(), Some("I"));

    let dir = TempDir::new().unwrap();
    let tree = dir.path().join("production");
    let codec = ExplodedCodec::new();
    codec.write(&clean, &tree).unwrap();
    let read_back = codec.read(&tree).unwrap();
    assert_eq!(read_back, clean);

    assert!(run(&read_back, None, &default_validators()).is_empty());
}

#[test]
fn backward_remap_restores_the_obfuscated_names() {
    let set = obfuscated_set();
    let table = rename_table();
    let forward = remap(&set, &table, Direction::Forward).unwrap();
    let back = remap(&forward, &table, Direction::Backward).unwrap();
    assert_eq!(back, set);
}

#[test]
fn remap_is_total_over_the_input() {
    let remapped = remap(&obfuscated_set(), &rename_table(), Direction::Forward).unwrap();
    assert_eq!(remapped.class_count(), obfuscated_set().class_count());
    let handler = remapped.class("com/example/ResizeHandler").unwrap();
    assert_eq!(handler.fields().count(), 1);
    assert_eq!(handler.methods().count(), 1);
}

/// Documented lambda method: the lambda rule flags the documentation, and
/// sanitizing clears the parameter name the heuristic way.
#[test]
fn documented_lambda_is_flagged_and_its_parameters_cleared() {
    let mut builder = MappingSetBuilder::new();
    let method = builder.create_class("com/example/Widget").create_method("lambda$init$0", "(I)V");
    method.add_javadoc(["Should not be here."]);
    method.create_parameter(0).set_name("x");
    let set = builder.build();

    let issues = run(&set, None, &default_validators());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    assert_eq!(issues[0].message, "lambda method must not be documented");

    let clean = sanitize(&set, None, &SanitizeOptions::default());
    let method = clean
        .class("com/example/Widget")
        .and_then(|class| class.method("lambda$init$0", "(I)V"))
        .unwrap();
    assert_eq!(method.parameter(0).unwrap().name(), None);
    // The documentation issue is validation's to report, not sanitize's to fix.
    assert_eq!(method.javadoc(), ["Should not be here."]);
}

/// Synthetic accessor with documentation: exactly one error, driven by
/// metadata access flags.
#[test]
fn documented_synthetic_accessor_is_one_error() {
    let mut builder = MappingSetBuilder::new();
    builder.create_class("com/example/Outer").create_method("access$000", "()I").add_javadoc([
        "Accessor doc.",
    ]);
    let set = builder.build();

    let mut index = MetadataIndex::new();
    let mut class = ClassMetadata::new("com/example/Outer", AccessFlags::PUBLIC);
    class.methods.push(MethodMetadata {
        name: "access$000".to_string(),
        descriptor: "()I".to_string(),
        access: AccessFlags::SYNTHETIC,
        lambda: false,
    });
    index.insert(class);

    let issues = run(&set, Some(&index), &default_validators());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "synthetic method must not be documented");
    assert_eq!(issues[0].path.to_string(), "com/example/Outer#access$000()I");
}

/// Nested-class name handling: `Outer$1` is anonymous, `Outer$Inner` is not.
#[test]
fn anonymous_detection_distinguishes_numbered_from_named_nesting() {
    let mut builder = MappingSetBuilder::new();
    builder
        .create_class("com/example/Outer$1")
        .create_method("accept", "(I)V")
        .create_parameter(0)
        .set_name("value");
    builder
        .create_class("com/example/Outer$Inner")
        .create_method("accept", "(I)V")
        .create_parameter(0)
        .set_name("value");
    let set = builder.build();

    let clean = sanitize(&set, None, &SanitizeOptions::default());
    let anonymous = clean
        .class("com/example/Outer$1")
        .and_then(|class| class.method("accept", "(I)V"))
        .unwrap();
    assert_eq!(anonymous.parameter(0).unwrap().name(), None);

    let named = clean
        .class("com/example/Outer$Inner")
        .and_then(|class| class.method("accept", "(I)V"))
        .unwrap();
    assert_eq!(named.parameter(0).unwrap().name(), Some("pValue"));
}

/// Staging-to-production promotion: read staging, merge into production
/// shape, write, re-read. A missing production tree reads as empty.
#[test]
fn promotion_from_staging_to_empty_production() {
    let dir = TempDir::new().unwrap();
    let staging = dir.path().join("staging.json");
    let production = dir.path().join("production");

    let single = SingleFileCodec::new();
    let exploded = ExplodedCodec::new();

    single.write(&obfuscated_set(), &staging).unwrap();
    let staged = single.read(&staging).unwrap();
    let existing = exploded.read(&production).unwrap();
    assert!(existing.is_empty());

    exploded.write(&staged, &production).unwrap();
    assert_eq!(exploded.read(&production).unwrap(), obfuscated_set());
}

#[test]
fn sanitize_then_store_round_trip_is_stable() {
    let remapped = remap(&obfuscated_set(), &rename_table(), Direction::Forward).unwrap();
    let options = SanitizeOptions::default();
    let clean = sanitize(&remapped, None, &options);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clean.json");
    let codec = SingleFileCodec::new();
    codec.write(&clean, &path).unwrap();
    let read_back = codec.read(&path).unwrap();

    // Sanitizing again changes nothing, stored or not.
    assert_eq!(sanitize(&read_back, None, &options), clean);
}
