//! Top-level compilation pipeline: read a source file, run it through
//! lexing (inside the parser), parsing, semantic analysis, and code
//! generation, then optionally hand the emitted C to a system compiler.
//!
//! Every phase in [`crate::parser`], [`crate::semantic`], and
//! [`crate::codegen`] raises its own error type; this module's only job is
//! to unify them behind one `Result` so `main` has a single match.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::codegen::{self, CodegenError};
use crate::parser::{ParseError, Parser};
use crate::semantic::{self, SemanticError};

#[derive(Debug)]
pub enum CompileError {
    Parse(ParseError),
    Semantic(SemanticError),
    Codegen(CodegenError),
    ReadSource { path: PathBuf, source: std::io::Error },
    WriteOutput { path: PathBuf, source: std::io::Error },
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<SemanticError> for CompileError {
    fn from(err: SemanticError) -> Self {
        CompileError::Semantic(err)
    }
}

impl From<CodegenError> for CompileError {
    fn from(err: CodegenError) -> Self {
        CompileError::Codegen(err)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Parse(err) => write!(f, "{err}"),
            CompileError::Semantic(err) => write!(f, "{err}"),
            CompileError::Codegen(err) => write!(f, "{err}"),
            CompileError::ReadSource { path, source } => {
                write!(f, "failed to open '{}': {source}", path.display())
            }
            CompileError::WriteOutput { path, source } => {
                write!(f, "failed to write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Where the driver should read from and write to, and whether it should
/// go all the way to a linked binary or stop at the generated C file.
pub struct CompileOptions {
    pub source_path: PathBuf,
    pub c_output_path: PathBuf,
    pub binary_output_path: PathBuf,
    pub emit_binary: bool,
}

impl CompileOptions {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        CompileOptions {
            source_path: source_path.into(),
            c_output_path: PathBuf::from(codegen::default_c_output()),
            binary_output_path: PathBuf::from(codegen::default_binary_output()),
            emit_binary: true,
        }
    }
}

/// What a successful compilation produced, for the CLI to report.
pub struct CompileReport {
    pub import_count: usize,
    pub declaration_count: usize,
    pub c_output_path: PathBuf,
    pub binary_output_path: PathBuf,
}

pub fn compile(options: &CompileOptions) -> Result<CompileReport, CompileError> {
    tracing::debug!("reading source file {}", options.source_path.display());
    let source = std::fs::read_to_string(&options.source_path).map_err(|source_err| {
        CompileError::ReadSource { path: options.source_path.clone(), source: source_err }
    })?;

    tracing::trace!("parsing {} byte(s) of source", source.len());
    let program = Parser::new(&source)?.parse()?;
    let import_count = program.imports.len();
    let declaration_count = program.declarations.len();
    println!("Parsed {import_count} import(s) and {declaration_count} declaration(s)");

    tracing::debug!("running semantic analysis");
    semantic::check_program(&program)?;
    println!("Semantic analysis completed successfully");

    tracing::debug!("generating C source");
    let c_source = codegen::generate(&program)?;
    write_file(&options.c_output_path, &c_source)?;

    if options.emit_binary {
        tracing::debug!("invoking system C compiler");
        let c_path = path_to_str(&options.c_output_path)?;
        let binary_path = path_to_str(&options.binary_output_path)?;
        codegen::compile_binary(c_path, binary_path)?;
    }

    println!(
        "Code generation completed: {} -> {}",
        options.c_output_path.display(),
        options.binary_output_path.display()
    );

    Ok(CompileReport {
        import_count,
        declaration_count,
        c_output_path: options.c_output_path.clone(),
        binary_output_path: options.binary_output_path.clone(),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CompileError> {
    std::fs::write(path, contents)
        .map_err(|source| CompileError::WriteOutput { path: path.to_path_buf(), source })
}

/// The external compiler takes its paths as plain strings; a non-UTF-8
/// path is reported the same way a missing compiler would be, since
/// there's nothing further the driver can do about it.
fn path_to_str(path: &Path) -> Result<&str, CompileError> {
    path.to_str().ok_or_else(|| {
        CompileError::WriteOutput {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path is not valid UTF-8"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reports_missing_source_file_as_read_error() {
        let options = CompileOptions::new("/nonexistent/path/to/source.lz");
        let err = compile(&options).unwrap_err();
        assert!(matches!(err, CompileError::ReadSource { .. }));
    }

    #[test]
    fn compiles_a_minimal_program_to_c_without_invoking_a_compiler() {
        let mut source_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(source_file, "main: () -> null = ()").unwrap();
        writeln!(source_file, "    log(\"hi\")").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut options = CompileOptions::new(source_file.path());
        options.c_output_path = dir.path().join("out.c");
        options.binary_output_path = dir.path().join("out");
        options.emit_binary = false;

        let report = compile(&options).unwrap();
        assert_eq!(report.import_count, 0);
        assert_eq!(report.declaration_count, 1);
        let generated = std::fs::read_to_string(&options.c_output_path).unwrap();
        assert!(generated.contains("lz_fn_main"));
        assert!(generated.contains("int main(void)"));
    }
}
