//! Name, scope, mutability, and flow-mode checking.
//!
//! This is not a type checker: expression types are never computed beyond
//! the maybe/result/concurrency/primitive classification in [`types`].
//! Two sweeps over the top-level declarations, mirroring the reference
//! analyzer: first every function is registered so forward references
//! resolve, then each declaration's body is walked and checked in order.

mod error;
mod symbol;
pub mod types;

pub use error::SemanticError;

use crate::ast::{Block, Decl, Expr, FunctionDecl, Program, Stmt, StructDecl};
use crate::token::Span;
use symbol::SymbolTable;
use types::{flow_mode_from_type, is_concurrency, is_primitive, is_result, FlowMode};

type SemaResult<T> = Result<T, SemanticError>;

const RESERVED_CONCURRENCY_IDENTS: [&str; 3] = ["task", "future", "chan"];

pub fn check_program(program: &Program) -> SemaResult<()> {
    let mut analyzer = Analyzer::new();

    for decl in &program.declarations {
        if let Decl::Function(fn_decl) = decl {
            analyzer.register_function(fn_decl)?;
        }
    }

    for decl in &program.declarations {
        analyzer.check_declaration(decl)?;
    }

    Ok(())
}

struct Analyzer {
    symbols: SymbolTable,
    current_flow_mode: FlowMode,
    in_function: bool,
}

impl Analyzer {
    fn new() -> Self {
        Analyzer { symbols: SymbolTable::new(), current_flow_mode: FlowMode::None, in_function: false }
    }

    fn register_function(&mut self, fn_decl: &FunctionDecl) -> SemaResult<()> {
        if !self.symbols.add_function(&fn_decl.name, &fn_decl.return_type) {
            return Err(SemanticError::new(fn_decl.span, "function already declared"));
        }
        Ok(())
    }

    fn check_declaration(&mut self, decl: &Decl) -> SemaResult<()> {
        match decl {
            Decl::Function(fn_decl) => self.check_function(fn_decl),
            Decl::Struct(struct_decl) => self.check_struct(struct_decl),
        }
    }

    fn check_function(&mut self, fn_decl: &FunctionDecl) -> SemaResult<()> {
        if is_concurrency(&fn_decl.return_type) {
            return Err(SemanticError::new(fn_decl.span, "concurrency types are not allowed here"));
        }
        if fn_decl.name == "main" && is_result(&fn_decl.return_type) {
            return Err(SemanticError::new(fn_decl.span, "main function must not return a result type"));
        }

        let previous_flow_mode = self.current_flow_mode;
        let previous_in_function = self.in_function;
        self.current_flow_mode = flow_mode_from_type(&fn_decl.return_type);
        self.in_function = true;

        self.symbols.push_scope();
        for param in &fn_decl.params {
            if is_concurrency(&param.type_name) {
                return Err(SemanticError::new(param.span, "concurrency types are not allowed here"));
            }
            self.note_flow_usage(flow_mode_from_type(&param.type_name), param.span)?;
            self.symbols.add_var(&param.name, false, Some(&param.type_name));
        }
        let result = self.check_block(&fn_decl.body, false);
        self.symbols.pop_scope();

        self.current_flow_mode = previous_flow_mode;
        self.in_function = previous_in_function;
        result
    }

    fn check_struct(&mut self, struct_decl: &StructDecl) -> SemaResult<()> {
        for field in &struct_decl.fields {
            if !is_primitive(&field.type_name) {
                return Err(SemanticError::new(field.span, "struct field type must be primitive"));
            }
        }
        for (i, field_i) in struct_decl.fields.iter().enumerate() {
            for field_j in &struct_decl.fields[i + 1..] {
                if field_i.name == field_j.name {
                    return Err(SemanticError::new(field_j.span, "duplicate field name in struct"));
                }
            }
        }
        Ok(())
    }

    fn check_block(&mut self, block: &Block, owns_scope: bool) -> SemaResult<()> {
        if owns_scope {
            self.symbols.push_scope();
        }
        let result = (|| {
            for stmt in &block.statements {
                self.check_statement(stmt)?;
            }
            Ok(())
        })();
        if owns_scope {
            self.symbols.pop_scope();
        }
        result
    }

    fn check_statement(&mut self, stmt: &Stmt) -> SemaResult<()> {
        match stmt {
            Stmt::VarDecl { is_mutable, name, type_name, initializer, span } => {
                if is_concurrency(type_name) {
                    return Err(SemanticError::new(*span, "concurrency types are not allowed here"));
                }
                self.note_flow_usage(flow_mode_from_type(type_name), *span)?;
                if !self.symbols.add_var(name, *is_mutable, Some(type_name)) {
                    return Err(SemanticError::new(*span, "symbol already declared in this scope"));
                }
                self.check_expression(initializer)
            }
            Stmt::Assign { target, value, span } => {
                let symbol = self
                    .symbols
                    .lookup_var(target)
                    .ok_or_else(|| SemanticError::new(*span, "assignment to undeclared variable"))?;
                if !symbol.is_mutable {
                    return Err(SemanticError::new(*span, "cannot assign to immutable variable"));
                }
                self.check_expression(value)
            }
            Stmt::If { condition, then_block, else_block, .. } => {
                self.check_expression(condition)?;
                self.check_block(then_block, true)?;
                if let Some(else_block) = else_block {
                    self.check_block(else_block, true)?;
                }
                Ok(())
            }
            Stmt::For { span, .. } => {
                Err(SemanticError::new(*span, "for statements are not yet supported for this type"))
            }
            Stmt::Return { value, span } => {
                if !self.in_function {
                    return Err(SemanticError::new(*span, "return outside of function"));
                }
                if let Some(value) = value {
                    self.check_expression(value)?;
                }
                Ok(())
            }
            Stmt::ExprStmt { expr, .. } => {
                self.check_expression(expr)?;
                self.check_unused_result(expr)
            }
        }
    }

    fn check_expression(&mut self, expr: &Expr) -> SemaResult<()> {
        match expr {
            Expr::Literal { .. } => Ok(()),
            Expr::Identifier { name, span } => self.check_identifier_reference(name, *span),
            Expr::Call { callee, args, span } => {
                self.check_call_callee(callee)?;
                for arg in args {
                    self.check_expression(arg)?;
                }
                if let Some(name) = callee_name(callee) {
                    if name == "log" && args.len() != 1 {
                        return Err(SemanticError::new(*span, "log must be called with exactly one argument"));
                    }
                }
                Ok(())
            }
            Expr::Binary { left, right, .. } => {
                self.check_expression(left)?;
                self.check_expression(right)
            }
        }
    }

    /// The call target gets its own resolution rule (function-or-variable)
    /// rather than the plain identifier rule, matching the reference: a
    /// callee that resolves to neither is "call to undefined function", a
    /// distinct message from a bare undeclared identifier elsewhere.
    fn check_call_callee(&mut self, callee: &Expr) -> SemaResult<()> {
        match callee {
            Expr::Identifier { name, span } => {
                if RESERVED_CONCURRENCY_IDENTS.contains(&name.as_str()) {
                    return Err(SemanticError::new(*span, "reserved identifier used as a value"));
                }
                if self.symbols.lookup_function(name).is_some() {
                    return Ok(());
                }
                if self.symbols.lookup_var(name).is_some() {
                    return Ok(());
                }
                Err(SemanticError::new(*span, "call to undefined function"))
            }
            other => self.check_expression(other),
        }
    }

    fn check_identifier_reference(&mut self, name: &str, span: Span) -> SemaResult<()> {
        if RESERVED_CONCURRENCY_IDENTS.contains(&name) {
            return Err(SemanticError::new(span, "reserved identifier used as a value"));
        }
        if self.symbols.lookup_var(name).is_some() {
            return Ok(());
        }
        if self.symbols.lookup_function(name).is_some() {
            return Ok(());
        }
        Err(SemanticError::new(span, "undeclared identifier"))
    }

    fn check_unused_result(&mut self, expr: &Expr) -> SemaResult<()> {
        let Expr::Call { callee, span, .. } = expr else { return Ok(()) };
        let Some(name) = callee_name(callee) else { return Ok(()) };
        let Some(function) = self.symbols.lookup_function(name) else { return Ok(()) };
        if is_result(&function.return_type) {
            return Err(SemanticError::new(*span, "result-returning function must not be ignored"));
        }
        Ok(())
    }

    fn note_flow_usage(&mut self, mode: FlowMode, span: Span) -> SemaResult<()> {
        if mode == FlowMode::None {
            return Ok(());
        }
        if self.current_flow_mode == FlowMode::None {
            self.current_flow_mode = mode;
            return Ok(());
        }
        if self.current_flow_mode != mode {
            return Err(SemanticError::new(span, "cannot mix maybe and result in the same function"));
        }
        Ok(())
    }
}

fn callee_name(callee: &Expr) -> Option<&str> {
    match callee {
        Expr::Identifier { name, .. } => Some(name.as_str()),
        _ => None,
    }
}
