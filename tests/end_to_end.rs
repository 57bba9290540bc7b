mod common;

use common::compile_and_run;

#[test]
fn hello_program_prints_hello() {
    let source = "\
main: () -> null = ()
    if true
        log(\"hello\")
";
    assert_eq!(compile_and_run(source), "hello\n");
}

#[test]
fn branching_function_picks_the_right_message() {
    let source = "\
is_positive: (int) -> bool = (x)
    if x > 0
        return true
    return false

main: () -> null = ()
    ok: bool = is_positive(5)
    if ok
        log(\"positive\")
    else
        log(\"negative\")
";
    assert_eq!(compile_and_run(source), "positive\n");
}

#[test]
fn empty_program_runs_and_reports_no_entrypoint() {
    let source = "";
    let dir = tempfile::tempdir().unwrap();
    let source_path = common::write_source(&dir, source);

    let mut options = lazylang::driver::CompileOptions::new(source_path);
    options.c_output_path = dir.path().join("out.c");
    options.binary_output_path = dir.path().join("out");

    lazylang::driver::compile(&options).unwrap();

    let output = std::process::Command::new(&options.binary_output_path).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no entry point defined"));
}
