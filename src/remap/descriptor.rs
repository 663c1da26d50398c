//! JVM descriptor rewriting against a class rename table.

use super::table::RenameTable;

/// Rewrites every object type in a field or method descriptor using the
/// table's class renames. Types without a rename pass through verbatim, as
/// does anything that is not an `L<name>;` object type (primitives, array
/// prefixes, the parameter parentheses).
pub(crate) fn remap_descriptor(descriptor: &str, table: &RenameTable) -> String {
    let mut out = String::with_capacity(descriptor.len());
    let mut rest = descriptor;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix('L') {
            if let Some(end) = stripped.find(';') {
                let name = &stripped[..end];
                out.push('L');
                out.push_str(table.class_target(name).unwrap_or(name));
                out.push(';');
                rest = &stripped[end + 1..];
                continue;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
            rest = chars.as_str();
        }
    }
    out
}
