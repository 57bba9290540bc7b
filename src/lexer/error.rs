use std::fmt;

/// The two fatal conditions the lexer itself can raise.
///
/// These do not use the `[line L:C] <Phase> error: ...` shape the parser,
/// analyzer, and generator share -- the reference lexer predates that
/// convention and reports indentation and stray-`!` failures with its own
/// wording, which this implementation preserves verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    Indentation { line: usize },
    StrayBang { line: usize, column: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Indentation { line } => write!(f, "Indentation error at line {line}"),
            LexError::StrayBang { line, column } => {
                write!(f, "Unexpected '!' at line {line}, column {column}")
            }
        }
    }
}

impl std::error::Error for LexError {}
