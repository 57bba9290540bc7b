use std::fmt;

use crate::token::Span;

/// A codegen failure. Most carry the span of the AST node that triggered
/// them; a handful of structural failures (e.g. an empty program with no
/// `main`) have none, mirroring the reference generator's `cg_fail`, which
/// accepts a nullable token.
#[derive(Debug, Clone, PartialEq)]
pub struct CodegenError {
    pub message: String,
    pub span: Option<Span>,
}

impl CodegenError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        CodegenError { message: message.into(), span: Some(span) }
    }

    pub fn without_span(message: impl Into<String>) -> Self {
        CodegenError { message: message.into(), span: None }
    }
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => {
                write!(f, "[line {}:{}] Codegen error: {}", span.line, span.column, self.message)
            }
            None => write!(f, "Codegen error: {}", self.message),
        }
    }
}

impl std::error::Error for CodegenError {}
