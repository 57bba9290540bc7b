use super::{ParseResult, Parser};
use crate::ast::Stmt;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    pub(super) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.matches(&TokenKind::If)? {
            return self.parse_if_stmt();
        }
        if self.matches(&TokenKind::For)? {
            return self.parse_for_stmt();
        }
        if self.matches(&TokenKind::Mut)? {
            return self.parse_var_decl(true);
        }
        if self.matches(&TokenKind::Return)? {
            return self.parse_return();
        }
        if matches!(self.current.kind, TokenKind::Ident(_)) {
            match self.peek_next() {
                TokenKind::Colon => return self.parse_var_decl(false),
                TokenKind::Equal => return self.parse_assignment(),
                _ => {}
            }
        }
        self.parse_expr_stmt()
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let if_span = self.previous.span;
        let condition = self.parse_expression()?;
        let then_block = self.parse_block()?;

        self.skip_newlines()?;
        let else_block = if self.matches(&TokenKind::Else)? { Some(self.parse_block()?) } else { None };

        Ok(Stmt::If { condition, then_block, else_block, span: if_span })
    }

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let for_span = self.previous.span;
        let iterator_token = self.consume_ident("expected loop iterator name")?;
        let iterator = match iterator_token.kind {
            TokenKind::Ident(s) => s,
            _ => unreachable!(),
        };
        self.consume(&TokenKind::In, "expected 'in' after loop iterator")?;
        let iterable = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(Stmt::For { iterator, iterable, body, span: for_span })
    }

    fn parse_var_decl(&mut self, is_mutable: bool) -> ParseResult<Stmt> {
        let message = if is_mutable {
            "expected identifier after 'mut'"
        } else {
            "expected identifier in variable declaration"
        };
        let name_token = self.consume_ident(message)?;
        let name = match name_token.kind {
            TokenKind::Ident(s) => s,
            _ => unreachable!(),
        };
        self.consume(&TokenKind::Colon, "expected ':' in variable declaration")?;

        let type_name = self.collect_type(&[TokenKind::Equal])?;
        self.consume(&TokenKind::Equal, "expected '=' before initializer")?;
        let initializer = self.parse_expression()?;
        self.require_line_break("expected newline after variable declaration")?;

        Ok(Stmt::VarDecl { is_mutable, name, type_name, initializer, span: name_token.span })
    }

    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let name_token = self.consume_ident("expected identifier for assignment")?;
        let target = match name_token.kind {
            TokenKind::Ident(s) => s,
            _ => unreachable!(),
        };
        self.consume(&TokenKind::Equal, "expected '=' in assignment")?;
        let value = self.parse_expression()?;
        self.require_line_break("expected newline after assignment")?;

        Ok(Stmt::Assign { target, value, span: name_token.span })
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let return_span = self.previous.span;
        let value = if self.check(&TokenKind::Newline)
            || self.check(&TokenKind::Dedent)
            || self.check(&TokenKind::Eof)
        {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.require_line_break("expected newline after return")?;

        Ok(Stmt::Return { value, span: return_span })
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expression()?;
        let span = expr.span();
        self.require_line_break("expected newline after expression")?;
        Ok(Stmt::ExprStmt { expr, span })
    }
}
