mod common;

use common::compile_to_c;

#[test]
fn emits_exactly_one_entrypoint() {
    let source = "\
main: () -> null = ()
    log(\"hello\")
";
    let generated = compile_to_c(source).unwrap();
    assert_eq!(generated.matches("int main(void)").count(), 1);
}

#[test]
fn log_calls_lower_to_the_runtime_helper_not_a_user_function() {
    let source = "\
main: () -> null = ()
    log(\"hello\")
";
    let generated = compile_to_c(source).unwrap();
    assert!(generated.contains("lz_runtime_log"));
    assert!(!generated.contains("lz_fn_log"));
}

#[test]
fn struct_definition_precedes_its_assign_helper_and_any_using_function() {
    let source = "\
struct Point
    x: int
    y: int

main: () -> null = ()
    log(\"hello\")
";
    let generated = compile_to_c(source).unwrap();
    let struct_pos = generated.find("struct Point {").expect("struct definition");
    let helper_pos = generated.find("lz_assign_struct_Point").expect("assign helper");
    let main_pos = generated.find("lz_fn_main").expect("main function");
    assert!(struct_pos < helper_pos, "struct definition must precede its assign helper");
    assert!(helper_pos < main_pos, "assign helper must precede functions that could reference it");
}

#[test]
fn compiling_the_same_source_twice_is_deterministic() {
    let source = "\
add: (int, int) -> int = (a, b)
    return a + b

main: () -> null = ()
    x: int = add(1, 2)
    log(\"done\")
";
    let first = compile_to_c(source).unwrap();
    let second = compile_to_c(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn tail_expression_is_returned_without_an_explicit_return_statement() {
    let source = "\
double: (int) -> int = (n)
    n + n
";
    let generated = compile_to_c(source).unwrap();
    assert!(generated.contains("__lz_ret"));
}

#[test]
fn explicit_return_as_last_statement_needs_no_tail_slot() {
    let source = "\
double: (int) -> int = (n)
    return n + n
";
    let generated = compile_to_c(source).unwrap();
    assert!(!generated.contains("__lz_ret"));
}

#[test]
fn empty_program_still_emits_a_runnable_entrypoint_guard() {
    let generated = compile_to_c("").unwrap();
    assert!(generated.contains("no entry point defined"));
}

#[test]
fn deeply_nested_conditionals_compile_without_indentation_errors() {
    let mut source = String::from("main: () -> null = ()\n");
    let mut indent = 1;
    for level in 0..8 {
        source.push_str(&"    ".repeat(indent));
        source.push_str(&format!("if {}\n", if level % 2 == 0 { "true" } else { "false" }));
        indent += 1;
    }
    source.push_str(&"    ".repeat(indent));
    source.push_str("log(\"deep\")\n");

    let generated = compile_to_c(&source);
    assert!(generated.is_ok(), "{generated:?}");
}
