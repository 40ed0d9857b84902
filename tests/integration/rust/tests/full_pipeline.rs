//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Lexer -> Parser -> AST -> VmGenerator -> VM code

use core_types::ErrorKind;
use parser::compile;

/// Helper function to compile Jack source into instruction lines
fn compile_jack(source: &str) -> Vec<String> {
    compile(source).expect("Compilation failed").lines()
}

/// Helper function to compile a single function body inside `class T`
fn compile_body(body: &str) -> Vec<String> {
    compile_jack(&format!("class T {{ function void f() {{ {} }} }}", body))
}

/// Test: Scenario A, locals are numbered in declaration order
#[test]
fn test_full_pipeline_scenario_a() {
    let lines = compile_jack(
        "class x { function void foo(){ var int x,y; let y=1; let x=y; return; } }",
    );
    assert_eq!(
        lines,
        vec![
            "function x.foo 2",
            "push constant 1",
            "pop local 1",
            "push local 1",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: Scenario B, receiver setup precedes the body
#[test]
fn test_full_pipeline_scenario_b() {
    let lines = compile_jack("class C { field int f; method int m(int a){ return f+a; } }");
    assert_eq!(
        lines,
        vec![
            "function C.m 0",
            "push argument 0",
            "pop pointer 0",
            "push this 0",
            "push argument 1",
            "add",
            "return",
        ]
    );
}

/// Test: Scenario C, while loop shape
#[test]
fn test_full_pipeline_scenario_c() {
    let lines = compile_jack(
        "class L { function void f(int n) { var int i; while (i < n) { let i = i+1; } return; } }",
    );
    assert_eq!(
        lines,
        vec![
            "function L.f 1",
            "label WHILE_START_0",
            "push local 0",
            "push argument 0",
            "lt",
            "not",
            "if-goto WHILE_END_0",
            "push local 0",
            "push constant 1",
            "add",
            "pop local 0",
            "goto WHILE_START_0",
            "label WHILE_END_0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: if/else control flow
#[test]
fn test_full_pipeline_if_else() {
    let lines = compile_body("var int x; if (x = 0) { let x = 1; } else { let x = 2; } return;");
    assert_eq!(
        &lines[1..],
        &[
            "push local 0",
            "push constant 0",
            "eq",
            "not",
            "if-goto IF_ELSE_0",
            "push constant 1",
            "pop local 0",
            "goto IF_DONE_0",
            "label IF_ELSE_0",
            "push constant 2",
            "pop local 0",
            "label IF_DONE_0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: nested control flow gets fresh labels
#[test]
fn test_full_pipeline_nested_labels() {
    let lines = compile_body(
        "var int i; while (i < 3) { if (i > 1) { let i = 0; } let i = i + 1; } return;",
    );
    let labels: Vec<&String> = lines
        .iter()
        .filter(|l| l.starts_with("label") || l.contains("goto"))
        .collect();
    assert_eq!(
        labels,
        vec![
            "label WHILE_START_0",
            "if-goto WHILE_END_0",
            "if-goto IF_DONE_1",
            "label IF_DONE_1",
            "goto WHILE_START_0",
            "label WHILE_END_0",
        ]
    );
}

/// Test: operators apply strictly left to right
#[test]
fn test_full_pipeline_left_fold() {
    let lines = compile_body("do Output.printInt(2 + 3 * 4); return;");
    assert_eq!(
        &lines[1..7],
        &[
            "push constant 2",
            "push constant 3",
            "add",
            "push constant 4",
            "call Math.multiply 2",
            "call Output.printInt 1",
        ]
    );
}

/// Test: unary operators and literals
#[test]
fn test_full_pipeline_unary_and_literals() {
    let lines = compile_body("var boolean b; let b = ~false & true; let b = -(1) | null; return;");
    assert_eq!(
        &lines[1..],
        &[
            "push constant 0",
            "not",
            "push constant 0",
            "not",
            "and",
            "pop local 0",
            "push constant 1",
            "neg",
            "push constant 0",
            "or",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: array read and write
#[test]
fn test_full_pipeline_arrays() {
    let lines = compile_body(
        "var Array a; let a = Array.new(2); let a[0] = a[1] / 2; return;",
    );
    assert_eq!(
        lines,
        vec![
            "function T.f 1",
            "push constant 2",
            "call Array.new 1",
            "pop local 0",
            "push local 0",
            "push constant 1",
            "add",
            "pop pointer 1",
            "push that 0",
            "push constant 2",
            "call Math.divide 2",
            "push local 0",
            "push constant 0",
            "add",
            "pop pointer 1",
            "pop that 0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: a class with a constructor, a method and a static counter
#[test]
fn test_full_pipeline_object_class() {
    let lines = compile_jack(
        "class Counter {
            static int instances;
            field int value;

            constructor Counter new(int start) {
                let value = start;
                let instances = instances + 1;
                return this;
            }

            method void bump() {
                do add(1);
                return;
            }

            method void add(int n) {
                let value = value + n;
                return;
            }
        }",
    );
    assert_eq!(
        lines,
        vec![
            "function Counter.new 0",
            "push constant 1",
            "call Memory.alloc 1",
            "pop pointer 0",
            "push argument 0",
            "pop this 0",
            "push static 0",
            "push constant 1",
            "add",
            "pop static 0",
            "push pointer 0",
            "return",
            "function Counter.bump 0",
            "push argument 0",
            "pop pointer 0",
            "push pointer 0",
            "push constant 1",
            "call Counter.add 2",
            "pop temp 0",
            "push constant 0",
            "return",
            "function Counter.add 0",
            "push argument 0",
            "pop pointer 0",
            "push this 0",
            "push argument 1",
            "add",
            "pop this 0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: calls through fields, locals and class names
#[test]
fn test_full_pipeline_method_call_targets() {
    let lines = compile_jack(
        "class Game {
            field Ball ball;
            method void run() {
                var Paddle p;
                do ball.move();
                do p.resize(2, 3);
                do Screen.clear();
                do this.run();
                return;
            }
        }",
    );
    assert_eq!(
        &lines[3..],
        &[
            "push this 0",
            "call Ball.move 1",
            "pop temp 0",
            "push local 0",
            "push constant 2",
            "push constant 3",
            "call Paddle.resize 3",
            "pop temp 0",
            "call Screen.clear 0",
            "pop temp 0",
            "push pointer 0",
            "call Game.run 1",
            "pop temp 0",
            "push constant 0",
            "return",
        ]
    );
}

/// Test: string literal construction
#[test]
fn test_full_pipeline_string() {
    let lines = compile_body("do Output.printString(\"OK\"); return;");
    assert_eq!(
        &lines[1..8],
        &[
            "push constant 2",
            "call String.new 1",
            "push constant 79",
            "call String.appendChar 2",
            "push constant 75",
            "call String.appendChar 2",
            "call Output.printString 1",
        ]
    );
}

/// Test: comments and doc comments are ignored
#[test]
fn test_full_pipeline_comments() {
    let lines = compile_jack(
        "/** A documented class. */
         class Main {
             // entry point
             function void main() { /* nothing */ return; }
         }",
    );
    assert_eq!(lines, vec!["function Main.main 0", "push constant 0", "return"]);
}

/// Test: each failure surfaces with its own error kind
#[test]
fn test_full_pipeline_error_kinds() {
    let cases = [
        ("class A { function void f() { let x = 1 ^ 2; } }", ErrorKind::LexicalError),
        ("class A { function void f() { let x = 1 } }", ErrorKind::ParseError),
        ("class A { function void f() { let x = 1; return; } }", ErrorKind::NameResolutionError),
        ("class A { } }", ErrorKind::ParseError),
        ("", ErrorKind::ParseError),
    ];
    for (source, kind) in cases {
        let err = compile(source).unwrap_err();
        assert_eq!(err.kind, kind, "source: {}", source);
    }
}

/// Test: a parse error never yields partial output
#[test]
fn test_full_pipeline_no_partial_output() {
    let result = compile(
        "class A { function void ok() { return; } function void bad() { return; }",
    );
    let err = result.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);
    assert_eq!(err.expected.as_deref(), Some("'}'"));
    assert!(err.source_position.is_some());
}

/// Test: a string too long for its length constant is rejected, not truncated
#[test]
fn test_full_pipeline_string_length_limit() {
    let source = format!(
        "class A {{ function void f() {{ do Output.printString(\"{}\"); return; }} }}",
        "x".repeat(70000)
    );
    let err = compile(&source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ParseError);

    let source = format!(
        "class A {{ function void f() {{ do Output.printString(\"{}\"); return; }} }}",
        "x".repeat(32767)
    );
    let lines = compile_jack(&source);
    assert_eq!(lines[1], "push constant 32767");
    assert_eq!(lines[2], "call String.new 1");
}
