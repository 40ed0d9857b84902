//! Parser and VM Code Integration Tests
//!
//! Tests that generated instructions honor the textual contract of the
//! intermediate language consumed by the downstream translator.

use parser::compile;
use vm_code::{Opcode, Segment, VmChunk};

const SQUARE: &str = "
class Square {
    field int x, y;
    field int size;

    constructor Square new(int ax, int ay, int asize) {
        let x = ax;
        let y = ay;
        let size = asize;
        do draw();
        return this;
    }

    method void dispose() {
        do Memory.deAlloc(this);
        return;
    }

    method void draw() {
        do Screen.setColor(true);
        do Screen.drawRectangle(x, y, x + size, y + size);
        return;
    }

    method void incSize() {
        if (((y + size) < 254) & ((x + size) < 510)) {
            do erase();
            let size = size + 2;
            do draw();
        }
        return;
    }

    method void erase() {
        do Screen.setColor(false);
        do Screen.drawRectangle(x, y, x + size, y + size);
        return;
    }
}
";

/// Test: emitted text parses back into the same instructions
#[test]
fn test_text_is_valid_instruction_language() {
    let chunk = compile(SQUARE).unwrap();
    let text = chunk.to_text();

    assert!(text.ends_with('\n'));
    let reparsed = VmChunk::parse(&text).unwrap();
    assert_eq!(reparsed, chunk);
}

/// Test: one function directive per routine, in declaration order
#[test]
fn test_routines_in_declaration_order() {
    let chunk = compile(SQUARE).unwrap();
    let functions: Vec<(String, u16)> = chunk
        .instructions
        .iter()
        .filter_map(|op| match op {
            Opcode::Function { name, n_locals } => Some((name.clone(), *n_locals)),
            _ => None,
        })
        .collect();

    assert_eq!(chunk.routine_count(), 5);
    assert_eq!(
        functions,
        vec![
            ("Square.new".to_string(), 0),
            ("Square.dispose".to_string(), 0),
            ("Square.draw".to_string(), 0),
            ("Square.incSize".to_string(), 0),
            ("Square.erase".to_string(), 0),
        ]
    );
}

/// Test: the constructor allocates one word per field
#[test]
fn test_constructor_field_count() {
    let chunk = compile(SQUARE).unwrap();
    assert_eq!(chunk.instructions[1], Opcode::Push(Segment::Constant, 3));
}

/// Test: the generator never pops into the constant segment
#[test]
fn test_no_pop_to_constant() {
    let chunk = compile(SQUARE).unwrap();
    assert!(!chunk
        .instructions
        .iter()
        .any(|op| matches!(op, Opcode::Pop(Segment::Constant, _))));
}

/// Test: every routine ends with a return
#[test]
fn test_routines_end_with_return() {
    let chunk = compile(SQUARE).unwrap();
    let mut previous: Option<&Opcode> = None;
    for op in &chunk.instructions {
        if matches!(op, Opcode::Function { .. }) {
            if let Some(prev) = previous {
                assert_eq!(prev, &Opcode::Return);
            }
        }
        previous = Some(op);
    }
    assert_eq!(chunk.instructions.last(), Some(&Opcode::Return));
}
