use super::{ParseResult, Parser};
use crate::ast::Import;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    pub(super) fn parse_import(&mut self) -> ParseResult<Import> {
        let import_token = self.consume(&TokenKind::Import, "expected 'import'")?;
        let mut segments = Vec::new();

        loop {
            let segment = self.consume_ident("expected identifier in import path")?;
            match segment.kind {
                TokenKind::Ident(name) => segments.push(name),
                _ => unreachable!("consume_ident only returns Ident tokens"),
            }
            if !self.matches(&TokenKind::Dot)? {
                break;
            }
        }

        self.require_line_break("expected newline after import statement")?;
        Ok(Import { segments, span: import_token.span })
    }
}
