/// A source location used to stamp diagnostics onto a single token.
///
/// Unlike a byte-range span, `Span` records only the line/column where the
/// token begins; that is all the diagnostic format in this crate ever
/// prints, and keeping it this small means `Token` and every AST node can
/// carry one by value without thinking about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Span { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_fields() {
        let span = Span::new(3, 7);
        assert_eq!(span.line, 3);
        assert_eq!(span.column, 7);
    }
}
