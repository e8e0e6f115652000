#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn eval_source(source: &str) -> Value {
    let result = quill_parse::parse(source);
    assert!(
        !result.has_errors(),
        "parse errors for {source:?}: {:?}",
        result.error_messages()
    );
    let env = Environment::new();
    eval(&result.program, &env)
}

fn assert_int_cases(cases: Vec<(&str, i64)>) {
    for (source, expected) in cases {
        assert_eq!(eval_source(source), Value::int(expected), "source: {source:?}");
    }
}

fn assert_bool_cases(cases: Vec<(&str, bool)>) {
    for (source, expected) in cases {
        assert_eq!(
            eval_source(source),
            Value::bool_from(expected),
            "source: {source:?}"
        );
    }
}

fn assert_error_cases(cases: Vec<(&str, &str)>) {
    for (source, expected) in cases {
        assert_eq!(
            eval_source(source),
            Value::error(expected),
            "source: {source:?}"
        );
    }
}

#[test]
fn integer_arithmetic() {
    assert_int_cases(vec![
        ("5", 5),
        ("10", 10),
        ("-5", -5),
        ("-10", -10),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
    ]);
}

#[test]
fn division_truncates() {
    assert_int_cases(vec![("7 / 2", 3), ("-7 / 2", -3), ("9 / 3", 3)]);
}

#[test]
fn boolean_expressions() {
    assert_bool_cases(vec![
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("false != true", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == true", false),
        ("(1 > 2) == false", true),
    ]);
}

#[test]
fn bang_operator() {
    assert_bool_cases(vec![
        ("!true", false),
        ("!false", true),
        ("!5", false),
        ("!!true", true),
        ("!!false", false),
        ("!!5", true),
    ]);
}

#[test]
fn if_else_expressions() {
    assert_int_cases(vec![
        ("if (true) { 10 }", 10),
        ("if (1) { 10 }", 10),
        ("if (1 < 2) { 10 }", 10),
        ("if (1 > 2) { 10 } else { 20 }", 20),
        ("if (1 < 2) { 10 } else { 20 }", 10),
    ]);
    assert_eq!(eval_source("if (false) { 10 }"), Value::NULL);
    assert_eq!(eval_source("if (1 > 2) { 10 }"), Value::NULL);
}

#[test]
fn zero_and_empty_string_are_truthy() {
    assert_int_cases(vec![
        ("if (0) { 1 } else { 2 }", 1),
        ("if (\"\") { 1 } else { 2 }", 1),
    ]);
}

#[test]
fn return_statements() {
    assert_int_cases(vec![
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
    ]);
}

#[test]
fn return_travels_through_nested_blocks() {
    let source = "\
        if (10 > 1) {\n\
          if (10 > 1) {\n\
            return 10;\n\
          }\n\
          return 1;\n\
        }";
    assert_eq!(eval_source(source), Value::int(10));
}

#[test]
fn error_handling() {
    assert_error_cases(vec![
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
        ("\"a\" == \"b\"", "unknown operator: STRING == STRING"),
        ("5 / 0", "division by zero"),
    ]);
}

#[test]
fn errors_stop_let_bindings() {
    // The failed binding must not leak a value for `a`.
    assert_eq!(
        eval_source("let a = 5 + true; a;"),
        Value::error("type mismatch: INTEGER + BOOLEAN")
    );
}

#[test]
fn let_statements() {
    assert_int_cases(vec![
        ("let a = 5; a;", 5),
        ("let a = 5 * 5; a;", 25),
        ("let a = 5; let b = a; b;", 5),
        ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
    ]);
}

#[test]
fn let_evaluates_to_null() {
    assert_eq!(eval_source("let a = 5;"), Value::NULL);
}

#[test]
fn function_values_render_canonically() {
    let value = eval_source("fn(x) { x + 2; };");
    match &value {
        Value::Function(func) => {
            assert_eq!(func.parameters, vec!["x".to_string()]);
            assert_eq!(func.body.to_string(), "(x + 2)");
        }
        other => panic!("expected function value, got {other:?}"),
    }
    assert_eq!(value.to_string(), "fn(x) { (x + 2) }");
}

#[test]
fn function_application() {
    assert_int_cases(vec![
        ("let identity = fn(x) { x; }; identity(5);", 5),
        ("let identity = fn(x) { return x; }; identity(5);", 5),
        ("let double = fn(x) { x * 2; }; double(5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
        ("fn(x) { x; }(5)", 5),
    ]);
}

#[test]
fn arrow_functions_apply_like_fn() {
    assert_int_cases(vec![
        ("let add = (x, y) => { x + y; }; add(3, 4);", 7),
        ("let five = () => { 5; }; five();", 5),
        ("((x) => { x * x; })(6)", 36),
    ]);
}

#[test]
fn closures() {
    let source = "\
        let newAdder = fn(x) {\n\
          fn(y) { x + y };\n\
        };\n\
        let addTwo = newAdder(2);\n\
        addTwo(3);";
    assert_eq!(eval_source(source), Value::int(5));
}

#[test]
fn closures_capture_by_reference() {
    // The closure sees the rebinding because it shares the defining
    // environment, it does not snapshot it.
    let source = "\
        let x = 10;\n\
        let get = fn() { x; };\n\
        let x = 20;\n\
        get();";
    assert_eq!(eval_source(source), Value::int(20));
}

#[test]
fn arity_is_not_checked() {
    // Extra arguments are ignored.
    assert_eq!(
        eval_source("let add = fn(x, y) { x + y; }; add(1, 2, 3);"),
        Value::int(3)
    );
    // Missing arguments surface lazily, as unbound identifiers.
    assert_eq!(
        eval_source("let add = fn(x, y) { x + y; }; add(1);"),
        Value::error("identifier not found: y")
    );
}

#[test]
fn calling_a_non_function() {
    assert_error_cases(vec![
        ("5(1)", "not a function: INTEGER"),
        ("let x = true; x();", "not a function: BOOLEAN"),
    ]);
}

#[test]
fn string_literals_and_concatenation() {
    assert_eq!(eval_source("\"hello world\""), Value::string("hello world"));
    assert_eq!(
        eval_source("\"Hello\" + \" \" + \"World\""),
        Value::string("Hello World")
    );
}

#[test]
fn builtin_len() {
    assert_int_cases(vec![
        ("len(\"\")", 0),
        ("len(\"four\")", 4),
        ("len(\"hello world\")", 11),
    ]);
    assert_error_cases(vec![
        ("len(1)", "argument to `len` not supported, got INTEGER"),
        (
            "len(\"one\", \"two\")",
            "wrong number of arguments. got=2, want=1",
        ),
    ]);
}

#[test]
fn builtins_can_be_shadowed() {
    assert_eq!(
        eval_source("let len = fn(x) { 10 }; len(\"abc\");"),
        Value::int(10)
    );
}

#[test]
fn interpreter_keeps_state_between_programs() {
    let interpreter = Interpreter::new();

    let first = quill_parse::parse("let a = 5;");
    assert!(!first.has_errors());
    interpreter.eval_program(&first.program);

    let second = quill_parse::parse("a + 1");
    assert!(!second.has_errors());
    assert_eq!(interpreter.eval_program(&second.program), Value::int(6));
}

#[test]
fn empty_program_is_null() {
    assert_eq!(eval_source(""), Value::NULL);
}

#[test]
fn errors_short_circuit_arguments() {
    assert_eq!(
        eval_source("let f = fn(x) { x; }; f(missing);"),
        Value::error("identifier not found: missing")
    );
}
