const INDENT_WIDTH: usize = 4;

/// Accumulates generated C source text in memory. The reference generator
/// writes straight to a `FILE*`; this keeps the same line/indent/printf
/// vocabulary but builds a `String` so the caller decides when (and
/// whether) to touch the filesystem.
pub struct CodeWriter {
    buffer: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter { buffer: String::new(), indent: 0 }
    }

    pub fn into_source(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buffer.push_str(&" ".repeat(INDENT_WIDTH));
        }
    }

    /// A complete, indented line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        self.write_indent();
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
    }

    /// Indentation with no trailing newline, for building up a line across
    /// several `printf`-style calls.
    pub fn begin_line(&mut self) {
        self.write_indent();
    }

    pub fn printf(&mut self, text: impl AsRef<str>) {
        self.buffer.push_str(text.as_ref());
    }

    pub fn end_line(&mut self) {
        self.buffer.push('\n');
    }

    pub fn push(&mut self) {
        self.indent += 1;
    }

    pub fn pop(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        CodeWriter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_nested_lines() {
        let mut writer = CodeWriter::new();
        writer.line("outer");
        writer.push();
        writer.line("inner");
        writer.pop();
        writer.line("outer again");
        assert_eq!(writer.into_source(), "outer\n    inner\nouter again\n");
    }

    #[test]
    fn printf_builds_a_line_without_its_own_indent() {
        let mut writer = CodeWriter::new();
        writer.begin_line();
        writer.printf("a");
        writer.printf("b");
        writer.end_line();
        assert_eq!(writer.into_source(), "ab\n");
    }

    #[test]
    fn pop_below_zero_saturates() {
        let mut writer = CodeWriter::new();
        writer.pop();
        writer.line("x");
        assert_eq!(writer.into_source(), "x\n");
    }
}
