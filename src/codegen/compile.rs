use std::process::Command;

use super::error::CodegenError;

pub const DEFAULT_C_OUTPUT: &str = "lazylang_out.c";
pub const DEFAULT_BINARY_OUTPUT: &str = "lazylang_out";

pub fn default_c_output() -> &'static str {
    DEFAULT_C_OUTPUT
}

pub fn default_binary_output() -> &'static str {
    DEFAULT_BINARY_OUTPUT
}

/// Probes for a command the same way the reference generator does, via a
/// shell `command -v`, rather than searching `PATH` ourselves -- this keeps
/// behavior aligned with whatever shell builtins and aliases the user's
/// environment would apply to an actual invocation.
fn command_exists(cmd: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {cmd} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Runs the runtime source and the generated C file through a real C
/// compiler. Unlike the reference generator, which hands a single shell
/// string to `system()`, this passes each argument separately -- the
/// source and binary paths never pass through a shell, so a path
/// containing shell metacharacters can't be misinterpreted.
fn invoke_compiler(compiler: &str, c_path: &str, binary_path: &str) -> Result<(), CodegenError> {
    let status = Command::new(compiler)
        .args(["-std=c11", "-Wall", "-Wextra"])
        .arg(c_path)
        .arg("src/runtime/runtime.c")
        .arg("-o")
        .arg(binary_path)
        .status()
        .map_err(|err| {
            CodegenError::without_span(format!("failed to run {compiler}: {err}"))
        })?;

    if !status.success() {
        return Err(CodegenError::without_span(format!(
            "{compiler} failed while building '{binary_path}'"
        )));
    }
    Ok(())
}

/// Compiles the generated C file to a binary, preferring `clang` and
/// falling back to `cc`.
pub fn compile_binary(c_path: &str, binary_path: &str) -> Result<(), CodegenError> {
    if command_exists("clang") {
        return invoke_compiler("clang", c_path, binary_path);
    }
    tracing::debug!("clang not found; attempting to use cc instead");
    if command_exists("cc") {
        return invoke_compiler("cc", c_path, binary_path);
    }
    Err(CodegenError::without_span("no suitable C compiler found (missing clang and cc)"))
}
