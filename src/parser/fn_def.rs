use super::{ParseResult, Parser};
use crate::ast::{Block, Field, FunctionDecl, Param, StructDecl};
use crate::token::{Token, TokenKind};

impl<'a> Parser<'a> {
    /// `[pub] NAME ':' '(' <type> (',' <type>)* ')' '->' <ret-type> '=' '(' IDENT (',' IDENT)* ')' <block>`
    ///
    /// The type list and the name list are parsed independently and then
    /// checked for equal length -- a deliberately unusual grammar where a
    /// function's parameter types and parameter names are each their own
    /// parenthesized list.
    pub(super) fn parse_function_decl(
        &mut self,
        is_public: bool,
        name_token: Token,
    ) -> ParseResult<FunctionDecl> {
        let name = match name_token.kind {
            TokenKind::Ident(ref s) => s.clone(),
            _ => unreachable!("caller already checked this is an identifier"),
        };

        let type_terminators = [TokenKind::Comma, TokenKind::RParen];
        self.consume(&TokenKind::Colon, "expected ':' after function name")?;
        self.consume(&TokenKind::LParen, "expected '(' before parameter type list")?;

        let mut type_names = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                type_names.push(self.collect_type(&type_terminators)?);
                if !self.matches(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.consume(&TokenKind::RParen, "expected ')' after parameter types")?;

        self.consume(&TokenKind::Arrow, "expected '->' before return type")?;
        let return_type = self.collect_type(&[TokenKind::Equal])?;

        self.consume(&TokenKind::Equal, "expected '=' before parameter names")?;
        self.consume(&TokenKind::LParen, "expected '(' before parameter names")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let name_tok = self.consume_ident("expected parameter name")?;
                if params.len() >= type_names.len() {
                    return Err(self.error_at(name_tok.span, "missing parameter type"));
                }
                let param_name = match name_tok.kind {
                    TokenKind::Ident(s) => s,
                    _ => unreachable!(),
                };
                params.push(Param {
                    name: param_name,
                    type_name: type_names[params.len()].clone(),
                    span: name_tok.span,
                });
                if !self.matches(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.consume(&TokenKind::RParen, "expected ')' after parameter names")?;

        if params.len() != type_names.len() {
            return Err(self.error("mismatched parameter types and names"));
        }

        let body = self.parse_block()?;

        Ok(FunctionDecl {
            is_public,
            name,
            params,
            return_type,
            body,
            span: name_token.span,
        })
    }

    /// `pub? struct IDENT NEWLINE INDENT (IDENT ':' <type> NEWLINE)+ DEDENT`
    pub(super) fn parse_struct_decl(&mut self, is_public: bool) -> ParseResult<StructDecl> {
        self.consume(&TokenKind::Struct, "expected 'struct'")?;
        let name_token = self.consume_ident("expected struct name")?;
        let name = match name_token.kind {
            TokenKind::Ident(s) => s,
            _ => unreachable!(),
        };

        self.consume(&TokenKind::Newline, "expected newline after struct name")?;
        self.consume(&TokenKind::Indent, "expected indent before struct body")?;
        self.skip_newlines()?;

        let field_terminators = [TokenKind::Newline, TokenKind::Dedent];
        let mut fields = Vec::new();
        while !self.check(&TokenKind::Dedent) && !self.check(&TokenKind::Eof) {
            let field_token = self.consume_ident("expected field name")?;
            let field_name = match field_token.kind {
                TokenKind::Ident(s) => s,
                _ => unreachable!(),
            };
            self.consume(&TokenKind::Colon, "expected ':' after field name")?;
            let type_name = self.collect_type(&field_terminators)?;
            fields.push(Field { name: field_name, type_name, span: field_token.span });
            self.require_line_break("expected newline after struct field")?;
            self.skip_newlines()?;
        }

        self.consume(&TokenKind::Dedent, "expected dedent after struct body")?;
        Ok(StructDecl { is_public, name, fields, span: name_token.span })
    }

    /// `NEWLINE INDENT statement* DEDENT`
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.consume(&TokenKind::Newline, "expected newline before block")?;
        self.consume(&TokenKind::Indent, "expected indentation to start block")?;
        self.skip_newlines()?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::Dedent) && !self.check(&TokenKind::Eof) {
            statements.push(self.parse_statement()?);
            self.skip_newlines()?;
        }

        self.consume(&TokenKind::Dedent, "expected dedent to close block")?;
        Ok(Block { statements, span: start.span })
    }
}
