//! CLI entry point for the lazylang compiler.
//!
//! ```text
//! lazylang <source-file> [c-output [binary-output]]
//! ```

use std::path::PathBuf;

use clap::Parser as ClapParser;

use lazylang::driver::{self, CompileOptions};
use lazylang::diagnostics;

/// Positional-only CLI surface -- no subcommands, matching the reference
/// compiler's `<program> <source> [c-out [bin-out]]` invocation.
#[derive(ClapParser)]
#[command(name = "lazylang")]
#[command(about = "A compiler for the lazylang programming language", long_about = None)]
struct Cli {
    /// Source file to compile. Required, but left `Option` so a missing
    /// argument can be reported with the reference's own usage message
    /// and exit code rather than clap's generic one.
    source_file: Option<String>,
    /// Path for the generated C file. Defaults to `lazylang_out.c`.
    c_output: Option<String>,
    /// Path for the linked binary. Defaults to `lazylang_out`.
    binary_output: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let Some(source_file) = cli.source_file else {
        let program = std::env::args().next().unwrap_or_else(|| "lazylang".to_string());
        eprintln!("usage: {program} <source-file> [c-output [binary-output]]");
        std::process::exit(1);
    };

    let mut options = CompileOptions::new(source_file);
    if let Some(c_output) = cli.c_output {
        options.c_output_path = PathBuf::from(c_output);
    }
    if let Some(binary_output) = cli.binary_output {
        options.binary_output_path = PathBuf::from(binary_output);
    }

    if let Err(err) = driver::compile(&options) {
        diagnostics::report(&err);
        std::process::exit(1);
    }
}
