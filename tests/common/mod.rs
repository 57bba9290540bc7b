use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use lazylang::driver::{self, CompileError, CompileOptions};

/// Writes `source` to a fresh `.lz` file inside a scratch directory and
/// returns both so the directory lives as long as the returned path is
/// needed.
pub fn write_source(dir: &tempfile::TempDir, source: &str) -> PathBuf {
    let path = dir.path().join("program.lz");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(source.as_bytes()).unwrap();
    path
}

/// Compiles `source` to C only (no external compiler invocation), and
/// returns the generated C text.
pub fn compile_to_c(source: &str) -> Result<String, CompileError> {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(&dir, source);
    let mut options = CompileOptions::new(source_path);
    options.c_output_path = dir.path().join("out.c");
    options.binary_output_path = dir.path().join("out");
    options.emit_binary = false;

    driver::compile(&options)?;
    Ok(std::fs::read_to_string(&options.c_output_path).unwrap())
}

/// Compiles `source` all the way to a binary and runs it, returning its
/// captured stdout. Requires a real `clang` or `cc` on `PATH`.
pub fn compile_and_run(source: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(&dir, source);
    let mut options = CompileOptions::new(source_path);
    options.c_output_path = dir.path().join("out.c");
    options.binary_output_path = dir.path().join("out");
    options.emit_binary = true;

    driver::compile(&options).expect("compilation should succeed");

    let output = Command::new(&options.binary_output_path).output().expect("binary should run");
    String::from_utf8_lossy(&output.stdout).into_owned()
}
