use std::fmt;

use crate::token::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticError {
    pub message: String,
    pub span: Span,
}

impl SemanticError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        SemanticError { message: message.into(), span }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}:{}] Semantic error: {}", self.span.line, self.span.column, self.message)
    }
}

impl std::error::Error for SemanticError {}
