use crate::semantic::types::{is_maybe, is_result};

use super::context::Context;

/// Maps a lazylang type name to the C type used for storage -- struct
/// fields, locals, and parameters. Structs map to themselves (the forward
/// declaration makes the bare name a valid C type).
pub(super) fn c_type_for(ctx: &Context, type_name: &str) -> String {
    match type_name {
        "int" => "int64_t".to_string(),
        "float" => "double".to_string(),
        "bool" => "bool".to_string(),
        "string" => "struct lz_string *".to_string(),
        "null" => "void *".to_string(),
        _ if is_result(type_name) => "lz_result".to_string(),
        _ if is_maybe(type_name) => "lz_maybe".to_string(),
        _ => type_name.to_string(),
    }
}

/// Like `c_type_for`, but `null` collapses to `void` -- only valid in
/// return-type position, never for a variable or field.
pub(super) fn c_return_type_for(ctx: &Context, type_name: &str) -> String {
    if type_name == "null" {
        "void".to_string()
    } else {
        c_type_for(ctx, type_name)
    }
}

/// Picks the `lz_assign_*` helper that knows how to copy a value of this
/// type into a destination slot, freeing/releasing whatever was there
/// before if the type owns a resource.
pub(super) fn assign_helper_for(ctx: &Context, type_name: &str) -> String {
    match type_name {
        "int" => "lz_assign_int64".to_string(),
        "float" => "lz_assign_double".to_string(),
        "bool" => "lz_assign_bool".to_string(),
        "string" => "lz_assign_string".to_string(),
        _ if is_result(type_name) => "lz_assign_result".to_string(),
        _ if is_maybe(type_name) => "lz_assign_maybe".to_string(),
        _ => match ctx.find_struct(type_name) {
            Some(info) => info.assign_helper.clone(),
            None => "lz_assign_ptr".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_map_to_fixed_c_types() {
        let ctx = Context::new();
        assert_eq!(c_type_for(&ctx, "int"), "int64_t");
        assert_eq!(c_type_for(&ctx, "string"), "struct lz_string *");
        assert_eq!(c_return_type_for(&ctx, "null"), "void");
        assert_eq!(c_type_for(&ctx, "null"), "void *");
    }

    #[test]
    fn result_and_maybe_map_to_opaque_runtime_types() {
        let ctx = Context::new();
        assert_eq!(c_type_for(&ctx, "result[int,string]"), "lz_result");
        assert_eq!(c_type_for(&ctx, "maybe[int]"), "lz_maybe");
        assert_eq!(assign_helper_for(&ctx, "result[int,string]"), "lz_assign_result");
        assert_eq!(assign_helper_for(&ctx, "maybe[int]"), "lz_assign_maybe");
    }

    #[test]
    fn unknown_struct_name_falls_back_to_bare_pointer_helper() {
        let ctx = Context::new();
        assert_eq!(assign_helper_for(&ctx, "Widget"), "lz_assign_ptr");
        assert_eq!(c_type_for(&ctx, "Widget"), "Widget");
    }
}
