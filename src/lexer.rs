//! Lexical analysis: turns source text into a token stream with explicit
//! `INDENT`/`DEDENT` bookkeeping.
//!
//! [`Lexer::next_token`] is pull-based, mirroring the interface the parser
//! expects: one token at a time, on demand, with no backtracking needed on
//! the lexer's side.

mod cursor;
mod error;

pub use error::LexError;

use crate::token::{Span, Token, TokenKind};
use cursor::Cursor;

const INDENT_STACK_MAX: usize = 128;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            indent_stack: vec![0],
            pending_dedents: 0,
            at_line_start: true,
        }
    }

    fn span_here(&self) -> Span {
        Span::new(self.cursor.line(), self.cursor.column())
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return Ok(Token::new(TokenKind::Dedent, self.span_here()));
        }

        if self.at_line_start {
            self.at_line_start = false;
            if let Some(token) = self.handle_indentation()? {
                return Ok(token);
            }
        }

        self.scan_token()
    }

    /// Counts leading whitespace on a fresh line and reconciles it against
    /// the indent stack, unless the line is blank (only whitespace before
    /// the newline or end-of-file), in which case indentation is not
    /// touched at all and control falls through to normal scanning.
    fn handle_indentation(&mut self) -> Result<Option<Token>, LexError> {
        let indent_span = self.span_here();
        let mut indent = 0usize;
        while self.cursor.peek() == ' ' || self.cursor.peek() == '\t' {
            self.cursor.advance();
            indent += 1;
        }

        if self.cursor.peek() == '\n' || self.cursor.is_eof() {
            return Ok(None);
        }

        let current = *self.indent_stack.last().unwrap();

        if indent > current {
            if self.indent_stack.len() >= INDENT_STACK_MAX {
                return Err(LexError::Indentation { line: indent_span.line });
            }
            self.indent_stack.push(indent);
            return Ok(Some(Token::new(TokenKind::Indent, indent_span)));
        }

        if indent < current {
            while self.indent_stack.len() > 1 && indent < *self.indent_stack.last().unwrap() {
                self.indent_stack.pop();
                self.pending_dedents += 1;
            }
            if indent != *self.indent_stack.last().unwrap() {
                return Err(LexError::Indentation { line: indent_span.line });
            }
            self.pending_dedents -= 1;
            return Ok(Some(Token::new(TokenKind::Dedent, indent_span)));
        }

        Ok(None)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        loop {
            let span = self.span_here();
            let c = self.cursor.advance();

            match c {
                '\0' => {
                    if self.indent_stack.len() > 1 {
                        self.indent_stack.pop();
                        return Ok(Token::new(TokenKind::Dedent, span));
                    }
                    return Ok(Token::new(TokenKind::Eof, span));
                }
                ' ' | '\t' | '\r' => continue,
                '\n' => {
                    self.at_line_start = true;
                    return Ok(Token::new(TokenKind::Newline, span));
                }
                c if c.is_alphabetic() || c == '_' => return Ok(self.scan_identifier(c, span)),
                c if c.is_ascii_digit() => return Ok(self.scan_number(c, span)),
                '"' => return Ok(self.scan_string(span)),
                ':' => return Ok(Token::new(TokenKind::Colon, span)),
                ',' => return Ok(Token::new(TokenKind::Comma, span)),
                '=' => {
                    if self.cursor.matches('=') {
                        return Ok(Token::new(TokenKind::EqualEqual, span));
                    }
                    return Ok(Token::new(TokenKind::Equal, span));
                }
                '-' => {
                    if self.cursor.matches('>') {
                        return Ok(Token::new(TokenKind::Arrow, span));
                    }
                    return Ok(Token::new(TokenKind::Minus, span));
                }
                '+' => return Ok(Token::new(TokenKind::Plus, span)),
                '*' => return Ok(Token::new(TokenKind::Star, span)),
                '/' => return Ok(Token::new(TokenKind::Slash, span)),
                '!' => {
                    if self.cursor.matches('=') {
                        return Ok(Token::new(TokenKind::BangEqual, span));
                    }
                    return Err(LexError::StrayBang { line: span.line, column: span.column });
                }
                '<' => {
                    if self.cursor.matches('=') {
                        return Ok(Token::new(TokenKind::Lte, span));
                    }
                    return Ok(Token::new(TokenKind::Lt, span));
                }
                '>' => {
                    if self.cursor.matches('=') {
                        return Ok(Token::new(TokenKind::Gte, span));
                    }
                    return Ok(Token::new(TokenKind::Gt, span));
                }
                '(' => return Ok(Token::new(TokenKind::LParen, span)),
                ')' => return Ok(Token::new(TokenKind::RParen, span)),
                '.' => return Ok(Token::new(TokenKind::Dot, span)),
                '[' => return Ok(Token::new(TokenKind::LBracket, span)),
                ']' => return Ok(Token::new(TokenKind::RBracket, span)),
                other => {
                    // The reference lexer has no catch-all diagnostic for
                    // stray punctuation other than '!'; unknown characters
                    // are simply dropped and scanning continues.
                    let _ = other;
                    continue;
                }
            }
        }
    }

    fn scan_identifier(&mut self, first: char, span: Span) -> Token {
        let mut text = String::new();
        text.push(first);
        while self.cursor.peek().is_alphanumeric() || self.cursor.peek() == '_' {
            text.push(self.cursor.advance());
        }
        match TokenKind::keyword_for(&text) {
            Some(kind) => Token::new(kind, span),
            None => Token::new(TokenKind::Ident(text), span),
        }
    }

    fn scan_number(&mut self, first: char, span: Span) -> Token {
        let mut text = String::new();
        text.push(first);
        while self.cursor.peek().is_ascii_digit() {
            text.push(self.cursor.advance());
        }
        if self.cursor.peek() == '.' && self.cursor.peek_at(1).is_ascii_digit() {
            text.push(self.cursor.advance());
            while self.cursor.peek().is_ascii_digit() {
                text.push(self.cursor.advance());
            }
            return Token::new(TokenKind::Float(text), span);
        }
        Token::new(TokenKind::Int(text), span)
    }

    /// No escape processing happens here by design: the lexer hands the
    /// codegen stage raw interior text, and it is codegen's job to escape
    /// it for the C string literal it ultimately produces. An unterminated
    /// string is silently closed at end-of-file rather than diagnosed.
    fn scan_string(&mut self, span: Span) -> Token {
        let mut text = String::new();
        while self.cursor.peek() != '"' && !self.cursor.is_eof() {
            text.push(self.cursor.advance());
        }
        if self.cursor.peek() == '"' {
            self.cursor.advance();
        }
        Token::new(TokenKind::Str(text), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().expect("unexpected lex error");
            let done = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(lex_all(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn tokenizes_keywords_and_identifiers() {
        assert_eq!(
            lex_all("if mut x"),
            vec![
                TokenKind::If,
                TokenKind::Mut,
                TokenKind::Ident("x".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn tokenizes_int_and_float() {
        assert_eq!(
            lex_all("42 3.14"),
            vec![
                TokenKind::Int("42".into()),
                TokenKind::Float("3.14".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn trailing_dot_without_digit_is_not_a_float() {
        assert_eq!(
            lex_all("42."),
            vec![TokenKind::Int("42".into()), TokenKind::Dot, TokenKind::Eof]
        );
    }

    #[test]
    fn string_literal_has_no_escape_processing() {
        assert_eq!(
            lex_all(r#""a\nb""#),
            vec![TokenKind::Str("a\\nb".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_closes_at_eof() {
        assert_eq!(lex_all("\"abc"), vec![TokenKind::Str("abc".into()), TokenKind::Eof]);
    }

    #[test]
    fn two_char_operators_win_over_one_char_prefix() {
        assert_eq!(
            lex_all("== != -> <= >="),
            vec![
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::Arrow,
                TokenKind::Lte,
                TokenKind::Gte,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn bang_not_followed_by_equal_is_an_error() {
        let mut lexer = Lexer::new("!x");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err, LexError::StrayBang { line: 1, column: 1 });
    }

    #[test]
    fn indent_and_dedent_bracket_a_nested_block() {
        let source = "if true\n    log(\"a\")\nlog(\"b\")\n";
        let kinds = lex_all(source);
        assert_eq!(
            kinds,
            vec![
                TokenKind::If,
                TokenKind::True,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Ident("log".into()),
                TokenKind::LParen,
                TokenKind::Str("a".into()),
                TokenKind::RParen,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Ident("log".into()),
                TokenKind::LParen,
                TokenKind::Str("b".into()),
                TokenKind::RParen,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn blank_line_inside_a_block_does_not_desync_indentation() {
        let source = "if true\n    log(\"a\")\n\n    log(\"b\")\n";
        let kinds = lex_all(source);
        // Exactly one INDENT and one DEDENT bracket the whole block, even
        // though a blank line with no leading whitespace sits in the
        // middle of it.
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Indent).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Dedent).count(), 1);
    }

    #[test]
    fn dedent_to_outer_level_skips_intermediate_levels_in_one_call() {
        let source = "if a\n    if b\n        log(\"x\")\nlog(\"y\")\n";
        let kinds = lex_all(source);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Indent).count(), 2);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Dedent).count(), 2);
    }

    #[test]
    fn eof_inside_open_block_emits_outstanding_dedents_then_eof() {
        let source = "if true\n    log(\"a\")";
        let kinds = lex_all(source);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
        assert_eq!(kinds[kinds.len() - 2], TokenKind::Dedent);
    }

    #[test]
    fn carriage_return_is_ignored() {
        assert_eq!(lex_all("if\r\ntrue"), vec![TokenKind::If, TokenKind::Newline, TokenKind::True, TokenKind::Eof]);
    }
}
