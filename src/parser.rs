//! Recursive-descent parser: tokens to AST.
//!
//! The [`Parser`] keeps three tokens in hand (`previous`, `current`,
//! `next`) so that statement dispatch can look one token past `current`
//! without a separate backtracking mechanism (see `parse_statement` in
//! [`stmt`]). Each grammar concern lives in its own submodule; all of them
//! extend the same `Parser` type via separate `impl` blocks.

mod error;
mod expr;
mod fn_def;
mod import;
mod stmt;
mod types;

pub use error::ParseError;

use crate::ast::{Decl, Program};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    previous: Token,
    current: Token,
    next: Token,
}

type ParseResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        let next = lexer.next_token()?;
        Ok(Parser {
            lexer,
            previous: current.clone(),
            current,
            next,
        })
    }

    pub fn parse(mut self) -> ParseResult<Program> {
        let mut program = Program::default();
        let mut accepting_imports = true;

        self.skip_newlines()?;
        while !self.check(&TokenKind::Eof) {
            if self.check(&TokenKind::Import) {
                if !accepting_imports {
                    return Err(self.error("imports must appear before declarations"));
                }
                program.imports.push(self.parse_import()?);
            } else {
                accepting_imports = false;
                program.declarations.push(self.parse_top_level_decl()?);
            }
            self.skip_newlines()?;
        }

        Ok(program)
    }

    fn parse_top_level_decl(&mut self) -> ParseResult<Decl> {
        let is_public = self.matches(&TokenKind::Pub)?;
        if self.check(&TokenKind::Struct) {
            return Ok(Decl::Struct(self.parse_struct_decl(is_public)?));
        }
        let name_token = self.consume_ident("expected identifier for declaration")?;
        Ok(Decl::Function(self.parse_function_decl(is_public, name_token)?))
    }

    // ---- token-stream primitives shared by every grammar submodule ----

    fn advance(&mut self) -> ParseResult<()> {
        self.previous = std::mem::replace(&mut self.current, self.next.clone());
        self.next = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    fn peek_next(&self) -> &TokenKind {
        &self.next.kind
    }

    fn matches(&mut self, kind: &TokenKind) -> ParseResult<bool> {
        if !self.check(kind) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    fn consume(&mut self, kind: &TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            self.advance()?;
            return Ok(self.previous.clone());
        }
        Err(self.error(message))
    }

    fn consume_ident(&mut self, message: &str) -> ParseResult<Token> {
        if matches!(self.current.kind, TokenKind::Ident(_)) {
            self.advance()?;
            return Ok(self.previous.clone());
        }
        Err(self.error(message))
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::fatal(self.current.span, message)
    }

    fn error_at(&self, span: crate::token::Span, message: &str) -> ParseError {
        ParseError::fatal(span, message)
    }

    fn skip_newlines(&mut self) -> ParseResult<()> {
        while self.matches(&TokenKind::Newline)? {}
        Ok(())
    }

    /// A statement must end in a newline, unless the next structural token
    /// already closes the enclosing block (`DEDENT`) or ends the file.
    fn require_line_break(&mut self, message: &str) -> ParseResult<()> {
        if self.matches(&TokenKind::Newline)? {
            self.skip_newlines()?;
            return Ok(());
        }
        if self.check(&TokenKind::Dedent) || self.check(&TokenKind::Eof) {
            return Ok(());
        }
        Err(self.error(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, Stmt};

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        let program = parse("");
        assert!(program.imports.is_empty());
        assert!(program.declarations.is_empty());
    }

    #[test]
    fn import_after_declaration_is_an_error() {
        let source = "main: () -> null = ()\n    return\nimport foo\n";
        let err = Parser::new(source).unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::Fatal { .. }));
    }

    #[test]
    fn parses_function_with_params_and_body() {
        let source = "add: (int, int) -> int = (a, b)\n    return a + b\n";
        let program = parse(source);
        assert_eq!(program.declarations.len(), 1);
        match &program.declarations[0] {
            Decl::Function(f) => {
                assert_eq!(f.name, "add");
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.params[0].type_name, "int");
                assert_eq!(f.return_type, "int");
                assert_eq!(f.body.statements.len(), 1);
            }
            _ => panic!("expected a function declaration"),
        }
    }

    #[test]
    fn mismatched_param_types_and_names_is_an_error() {
        let source = "add: (int) -> int = (a, b)\n    return a\n";
        let err = Parser::new(source).unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::Fatal { .. }));
    }

    #[test]
    fn parses_struct_decl() {
        let source = "pub struct Point\n    x: int\n    y: int\n";
        let program = parse(source);
        match &program.declarations[0] {
            Decl::Struct(s) => {
                assert!(s.is_public);
                assert_eq!(s.name, "Point");
                assert_eq!(s.fields.len(), 2);
                assert_eq!(s.fields[1].name, "y");
            }
            _ => panic!("expected a struct declaration"),
        }
    }

    #[test]
    fn parses_if_else_var_decl_and_assignment() {
        let source = concat!(
            "main: () -> null = ()\n",
            "    x: int = 1\n",
            "    if x < 2\n",
            "        x = x + 1\n",
            "    else\n",
            "        x = 0\n",
            "    return\n",
        );
        let program = parse(source);
        let Decl::Function(f) = &program.declarations[0] else { panic!("expected function") };
        assert_eq!(f.body.statements.len(), 3);
        assert!(matches!(f.body.statements[0], Stmt::VarDecl { .. }));
        match &f.body.statements[1] {
            Stmt::If { then_block, else_block, .. } => {
                assert_eq!(then_block.statements.len(), 1);
                assert!(else_block.is_some());
            }
            _ => panic!("expected an if statement"),
        }
    }

    #[test]
    fn parses_for_loop_node() {
        let source = "main: () -> null = ()\n    for item in items\n        log(item)\n";
        let program = parse(source);
        let Decl::Function(f) = &program.declarations[0] else { panic!("expected function") };
        assert!(matches!(f.body.statements[0], Stmt::For { .. }));
    }

    #[test]
    fn expression_precedence_and_calls() {
        let source = "main: () -> null = ()\n    x: int = 1 + 2 * 3\n    log(add(x, 1))\n";
        let program = parse(source);
        let Decl::Function(f) = &program.declarations[0] else { panic!("expected function") };
        match &f.body.statements[0] {
            Stmt::VarDecl { initializer, .. } => match initializer {
                Expr::Binary { op: BinaryOp::Add, right, .. } => {
                    assert!(matches!(**right, Expr::Binary { op: BinaryOp::Mul, .. }));
                }
                _ => panic!("expected `+` at the top of the expression"),
            },
            _ => panic!("expected a var decl"),
        }
        match &f.body.statements[1] {
            Stmt::ExprStmt { expr: Expr::Call { args, .. }, .. } => {
                assert_eq!(args.len(), 1);
                assert!(matches!(args[0], Expr::Call { .. }));
            }
            _ => panic!("expected a call expression statement"),
        }
    }
}
