//! Abstract syntax tree for the compiler.
//!
//! The tree is a closed family of Rust enums (see [`expr::Expr`] and
//! [`stmt::Stmt`]); every node owns its children directly (`Box`/`Vec`), so
//! there are no explicit `destroy` functions anywhere in this module --
//! dropping a [`program::Program`] recursively drops everything beneath it
//! exactly once, for free.
//!
//! Type names (parameter types, field types, return types) are kept as
//! free-form owned strings rather than a parsed type AST; see
//! [`crate::semantic`] and [`crate::codegen`] for how they get interpreted.

pub mod expr;
pub mod program;
pub mod stmt;

pub use expr::{BinaryOp, Expr, Literal};
pub use program::{Decl, Field, FunctionDecl, Import, Param, Program, StructDecl};
pub use stmt::{Block, Stmt};
