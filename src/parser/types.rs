use super::{ParseResult, Parser};
use crate::token::TokenKind;

/// Collects a type expression as raw text, up to (but not including) a
/// caller-specified terminator token at bracket depth zero.
///
/// Types are never parsed into a structured representation -- the
/// semantic analyzer and code generator both classify them later by
/// prefix/exact match on the collected string. Whitespace between type
/// tokens is not preserved; the result is the concatenation of lexemes.
impl<'a> Parser<'a> {
    pub(super) fn collect_type(&mut self, terminators: &[TokenKind]) -> ParseResult<String> {
        let mut text = String::new();
        let mut bracket_depth: i32 = 0;
        let mut collected = false;

        loop {
            let kind = self.current.kind.clone();
            let kind = &kind;
            if *kind == TokenKind::Eof {
                break;
            }

            let is_terminator = terminators.contains(kind);
            let is_newline_like = matches!(kind, TokenKind::Newline | TokenKind::Dedent);

            if is_newline_like && bracket_depth == 0 {
                if !is_terminator {
                    return Err(self.error("unexpected line break in type"));
                }
                break;
            }

            if is_terminator && bracket_depth == 0 {
                break;
            }

            match kind {
                TokenKind::LBracket => bracket_depth += 1,
                TokenKind::RBracket => {
                    if bracket_depth == 0 {
                        return Err(self.error("unmatched ']' in type"));
                    }
                    bracket_depth -= 1;
                }
                _ => {}
            }

            let is_type_token = matches!(
                kind,
                TokenKind::Ident(_)
                    | TokenKind::Null
                    | TokenKind::Comma
                    | TokenKind::LBracket
                    | TokenKind::RBracket
                    | TokenKind::Dot
            );
            if !is_type_token && bracket_depth == 0 {
                return Err(self.error("unexpected token in type"));
            }

            text.push_str(Self::lexeme_for(kind));
            collected = true;
            self.advance()?;
        }

        if !collected {
            return Err(self.error("expected type name"));
        }

        Ok(text)
    }

    fn lexeme_for(kind: &TokenKind) -> &str {
        match kind {
            TokenKind::Ident(s) => s.as_str(),
            TokenKind::Null => "null",
            TokenKind::Comma => ",",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Dot => ".",
            _ => "",
        }
    }
}
