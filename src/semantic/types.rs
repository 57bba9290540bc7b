//! Type-name classification shared by the analyzer and the code generator.
//!
//! Types are never parsed into a structured representation anywhere in this
//! crate -- they stay raw strings from the parser onward, and every phase
//! that cares about a type's "shape" classifies it by prefix. This module
//! is the single place that happens, so the analyzer and the generator
//! can't drift apart on where a type's boundary falls (see the crate's
//! design notes on why the reference implementation's codegen module used
//! a looser check than its own semantic analyzer).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    None,
    Maybe,
    Result,
}

pub const PRIMITIVES: [&str; 5] = ["int", "float", "bool", "string", "null"];

pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name)
}

/// True if `type_name` is exactly `prefix`, or `prefix` immediately
/// followed by `[` -- e.g. `result` and `result[int,string]` both match
/// prefix `"result"`, but `resultish` does not.
fn type_starts_with(type_name: &str, prefix: &str) -> bool {
    match type_name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('['),
        None => false,
    }
}

pub fn is_maybe(type_name: &str) -> bool {
    type_starts_with(type_name, "maybe")
}

pub fn is_result(type_name: &str) -> bool {
    type_starts_with(type_name, "result")
}

pub fn is_concurrency(type_name: &str) -> bool {
    type_starts_with(type_name, "future") || type_starts_with(type_name, "chan")
}

pub fn flow_mode_from_type(type_name: &str) -> FlowMode {
    if is_result(type_name) {
        FlowMode::Result
    } else if is_maybe(type_name) {
        FlowMode::Maybe
    } else {
        FlowMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_boundary_rejects_lookalikes() {
        assert!(is_result("result"));
        assert!(is_result("result[int,string]"));
        assert!(!is_result("resultish"));
        assert!(is_maybe("maybe[int]"));
        assert!(!is_maybe("maybeish"));
    }

    #[test]
    fn unknown_names_are_neither_primitive_nor_flow() {
        assert!(!is_primitive("MyStruct"));
        assert_eq!(flow_mode_from_type("MyStruct"), FlowMode::None);
    }
}
