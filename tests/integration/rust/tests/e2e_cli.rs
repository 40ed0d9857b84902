//! End-to-End CLI Integration Tests
//!
//! Tests the complete compiler through the jack_cli Driver API.
//! This is the highest level integration test - source files to .vm files.

use jack_cli::{CliError, CompileReport, Driver};
use std::fs;
use tempfile::tempdir;

const MAIN: &str = "
class Main {
    function void main() {
        var Point p;
        let p = Point.new(3, 4);
        do Output.printInt(p.getX());
        return;
    }
}
";

const POINT: &str = "
class Point {
    field int x, y;

    constructor Point new(int ax, int ay) {
        let x = ax;
        let y = ay;
        return this;
    }

    method int getX() {
        return x;
    }
}
";

/// Test: a project directory compiles into one .vm file per class
#[test]
fn test_e2e_project_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Main.jack"), MAIN).unwrap();
    fs::write(dir.path().join("Point.jack"), POINT).unwrap();

    let mut report = CompileReport::new();
    let compiled = Driver::new()
        .run(&[dir.path().to_path_buf()], &mut report)
        .expect("Compilation failed");

    assert_eq!(compiled.len(), 2);
    assert_eq!(report.succeeded, 2);

    let main = fs::read_to_string(dir.path().join("Main.vm")).unwrap();
    assert_eq!(
        main.lines().collect::<Vec<_>>(),
        vec![
            "function Main.main 1",
            "push constant 3",
            "push constant 4",
            "call Point.new 2",
            "pop local 0",
            "push local 0",
            "call Point.getX 1",
            "call Output.printInt 1",
            "pop temp 0",
            "push constant 0",
            "return",
        ]
    );

    let point = fs::read_to_string(dir.path().join("Point.vm")).unwrap();
    assert!(point.starts_with("function Point.new 0\npush constant 2\ncall Memory.alloc 1\n"));
    assert!(point.contains("function Point.getX 0\npush argument 0\npop pointer 0\npush this 0\nreturn\n"));
}

/// Test: stdout mode writes no files
#[test]
fn test_e2e_stdout_mode() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Point.jack");
    fs::write(&source, POINT).unwrap();

    let file = Driver::new().with_stdout(true).compile_file(&source).unwrap();

    assert_eq!(file.output, None);
    assert!(!dir.path().join("Point.vm").exists());
    assert_eq!(file.chunk.routine_count(), 2);
}

/// Test: a compile error names the file and leaves no output behind
#[test]
fn test_e2e_compile_error() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Main.jack");
    fs::write(&source, "class Main { function void main() { do missing.call(; } }").unwrap();

    let err = Driver::new().compile_file(&source).unwrap_err();

    match &err {
        CliError::Compile { path, error } => {
            assert_eq!(path, &source);
            assert_eq!(error.kind, core_types::ErrorKind::ParseError);
        }
        other => panic!("Expected compile error, got {:?}", other),
    }
    assert!(!dir.path().join("Main.vm").exists());
}

/// Test: diagnostics flags do not change the output
#[test]
fn test_e2e_diagnostics_do_not_change_output() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("Point.jack");
    fs::write(&source, POINT).unwrap();

    let plain = Driver::new().with_stdout(true).compile_file(&source).unwrap();
    let noisy = Driver::new()
        .with_stdout(true)
        .with_print_tokens(true)
        .with_print_ast(true)
        .with_verbose(true)
        .compile_file(&source)
        .unwrap();

    assert_eq!(plain.chunk, noisy.chunk);
}
