//! A compiler front-end and C-emitting back-end for lazylang, a small
//! statically-typed, indentation-structured language.
//!
//! The pipeline is the usual shape: [`lexer`] produces tokens on demand,
//! [`parser`] consumes them into an [`ast::Program`], [`semantic`] checks
//! names/scoping/mutability/flow-mode, and [`codegen`] lowers the checked
//! tree to C11 source, optionally handing it to a system compiler.
//! [`driver`] sequences all four phases for the CLI in `main.rs`.

pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod driver;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod token;
