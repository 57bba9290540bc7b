use std::fmt;

use crate::lexer::LexError;
use crate::token::Span;

/// A fatal parse failure, or a fatal failure bubbled up from the lexer the
/// parser is pulling tokens from -- the parser has no lexer error of its
/// own; a lex failure simply terminates parsing at the point it occurs.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Lex(LexError),
    Fatal { message: String, span: Span },
}

impl ParseError {
    pub fn fatal(span: Span, message: impl Into<String>) -> Self {
        ParseError::Fatal { message: message.into(), span }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{err}"),
            ParseError::Fatal { message, span } => {
                write!(f, "[line {}:{}] Parse error: {message}", span.line, span.column)
            }
        }
    }
}

impl std::error::Error for ParseError {}
