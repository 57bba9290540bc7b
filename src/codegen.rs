//! C code generation: takes a checked [`crate::ast::Program`] and produces
//! C11 source text, then (optionally) hands it to an external compiler.
//!
//! The emission order is fixed and mirrors the reference generator: file
//! banner, includes, struct forward declarations, struct definitions,
//! struct assignment helpers, function prototypes, function bodies, and
//! finally the `main` trampoline that calls into `lz_fn_main`.

mod compile;
mod context;
mod emit;
mod error;
mod types;
mod writer;

use context::Context;

pub use compile::{compile_binary, default_binary_output, default_c_output};
pub use error::CodegenError;

/// Generates the full C translation unit for `program` as a single string.
/// Callers decide whether and where to write it to disk.
pub fn generate(program: &crate::ast::Program) -> Result<String, CodegenError> {
    let mut ctx = Context::new();
    emit::emit_program(&mut ctx, program)?;
    Ok(ctx.writer.into_source())
}
