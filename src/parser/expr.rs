use super::{ParseResult, Parser};
use crate::ast::{BinaryOp, Expr, Literal};
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_comparison()?;
        loop {
            let op = match self.current.kind {
                TokenKind::EqualEqual => BinaryOp::Eq,
                TokenKind::BangEqual => BinaryOp::NotEq,
                _ => break,
            };
            let op_span = self.current.span;
            self.advance()?;
            let right = self.parse_comparison()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(right), span: op_span };
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Lte => BinaryOp::Lte,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Gte => BinaryOp::Gte,
                _ => break,
            };
            let op_span = self.current.span;
            self.advance()?;
            let right = self.parse_term()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(right), span: op_span };
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let op_span = self.current.span;
            self.advance()?;
            let right = self.parse_factor()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(right), span: op_span };
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_call()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            let op_span = self.current.span;
            self.advance()?;
            let right = self.parse_call()?;
            expr = Expr::Binary { op, left: Box::new(expr), right: Box::new(right), span: op_span };
        }
        Ok(expr)
    }

    fn parse_call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        while self.matches(&TokenKind::LParen)? {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let lparen_span = self.previous.span;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.matches(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.consume(&TokenKind::RParen, "expected ')' after arguments")?;
        Ok(Expr::Call { callee: Box::new(callee), args, span: lparen_span })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if let TokenKind::Int(text) = self.current.kind.clone() {
            let span = self.current.span;
            self.advance()?;
            return Ok(Expr::Literal { value: Literal::Int(text), span });
        }
        if let TokenKind::Float(text) = self.current.kind.clone() {
            let span = self.current.span;
            self.advance()?;
            return Ok(Expr::Literal { value: Literal::Float(text), span });
        }
        if let TokenKind::Str(text) = self.current.kind.clone() {
            let span = self.current.span;
            self.advance()?;
            return Ok(Expr::Literal { value: Literal::Str(text), span });
        }
        if self.matches(&TokenKind::True)? {
            return Ok(Expr::Literal { value: Literal::Bool(true), span: self.previous.span });
        }
        if self.matches(&TokenKind::False)? {
            return Ok(Expr::Literal { value: Literal::Bool(false), span: self.previous.span });
        }
        if self.matches(&TokenKind::Null)? {
            return Ok(Expr::Literal { value: Literal::Null, span: self.previous.span });
        }
        if let TokenKind::Ident(name) = self.current.kind.clone() {
            let span = self.current.span;
            self.advance()?;
            return Ok(Expr::Identifier { name, span });
        }
        if self.matches(&TokenKind::LParen)? {
            let expr = self.parse_expression()?;
            self.consume(&TokenKind::RParen, "expected ')' after expression")?;
            return Ok(expr);
        }

        Err(self.error("unexpected token in expression"))
    }
}
