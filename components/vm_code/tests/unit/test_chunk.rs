//! Tests for VmChunk

use vm_code::{Opcode, Segment, VmChunk};

#[test]
fn test_chunk_creation() {
    let chunk = VmChunk::new();
    assert_eq!(chunk.instruction_count(), 0);
    assert!(chunk.is_empty());
}

#[test]
fn test_chunk_emit_instruction() {
    let mut chunk = VmChunk::new();
    chunk.emit(Opcode::Push(Segment::Constant, 0));
    chunk.emit(Opcode::Not);
    assert_eq!(chunk.instruction_count(), 2);
    assert_eq!(chunk.lines(), vec!["push constant 0", "not"]);
}

#[test]
fn test_chunk_text_has_trailing_newline() {
    let chunk: VmChunk = vec![Opcode::Push(Segment::Constant, 0), Opcode::Return]
        .into_iter()
        .collect();
    assert_eq!(chunk.to_text(), "push constant 0\nreturn\n");
}

#[test]
fn test_routine_count() {
    let mut chunk = VmChunk::new();
    chunk.emit(Opcode::Function { name: "A.a".to_string(), n_locals: 0 });
    chunk.emit(Opcode::Return);
    chunk.emit(Opcode::Function { name: "A.b".to_string(), n_locals: 2 });
    chunk.emit(Opcode::Return);
    assert_eq!(chunk.routine_count(), 2);
}

#[test]
fn test_parse_skips_comments_and_blank_lines() {
    let text = "// header\n\nfunction Main.main 0 // entry\npush constant 0\nreturn\n";
    let chunk = VmChunk::parse(text).unwrap();
    assert_eq!(chunk.instruction_count(), 3);
    assert_eq!(chunk.instructions[0], Opcode::Function { name: "Main.main".to_string(), n_locals: 0 });
}

#[test]
fn test_parse_reports_line_number() {
    let (line, _) = VmChunk::parse("push constant 1\nfrobnicate\n").unwrap_err();
    assert_eq!(line, 2);
}

#[test]
fn test_parse_of_rendered_text_is_identity() {
    let mut chunk = VmChunk::new();
    chunk.emit(Opcode::Function { name: "C.m".to_string(), n_locals: 0 });
    chunk.emit(Opcode::Push(Segment::Argument, 0));
    chunk.emit(Opcode::Pop(Segment::Pointer, 0));
    chunk.emit(Opcode::Push(Segment::This, 0));
    chunk.emit(Opcode::Push(Segment::Argument, 1));
    chunk.emit(Opcode::Add);
    chunk.emit(Opcode::Return);
    assert_eq!(VmChunk::parse(&chunk.to_text()).unwrap(), chunk);
}
