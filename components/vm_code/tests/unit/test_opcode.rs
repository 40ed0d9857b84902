//! Tests for Opcode and Segment rendering and parsing

use vm_code::{InstructionParseError, Opcode, Segment};

#[test]
fn test_every_segment_round_trips_by_name() {
    for segment in Segment::ALL {
        assert_eq!(segment.as_str().parse::<Segment>().unwrap(), segment);
    }
}

#[test]
fn test_unknown_segment() {
    let err = "push heap 0".parse::<Opcode>().unwrap_err();
    assert_eq!(err, InstructionParseError::UnknownSegment("heap".to_string()));
}

#[test]
fn test_function_and_call_render() {
    let function = Opcode::Function {
        name: "Square.new".to_string(),
        n_locals: 3,
    };
    let call = Opcode::Call {
        name: "Memory.alloc".to_string(),
        n_args: 1,
    };
    assert_eq!(function.to_string(), "function Square.new 3");
    assert_eq!(call.to_string(), "call Memory.alloc 1");
}

#[test]
fn test_parse_tolerates_extra_whitespace() {
    let op: Opcode = "  push   argument\t2 ".parse().unwrap();
    assert_eq!(op, Opcode::Push(Segment::Argument, 2));
}

#[test]
fn test_parse_label_commands() {
    assert_eq!(
        "label IF_ELSE_0".parse::<Opcode>().unwrap(),
        Opcode::Label("IF_ELSE_0".to_string())
    );
    assert_eq!(
        "goto WHILE_START_2".parse::<Opcode>().unwrap(),
        Opcode::Goto("WHILE_START_2".to_string())
    );
    assert_eq!(
        "if-goto WHILE_END_3".parse::<Opcode>().unwrap(),
        Opcode::IfGoto("WHILE_END_3".to_string())
    );
}

#[test]
fn test_pop_constant_is_rejected() {
    assert_eq!(
        "pop constant 1".parse::<Opcode>().unwrap_err(),
        InstructionParseError::PopConstant
    );
}

#[test]
fn test_index_out_of_range() {
    let err = "push constant 70000".parse::<Opcode>().unwrap_err();
    assert!(matches!(err, InstructionParseError::InvalidOperand { .. }));
}

#[test]
fn test_unknown_command() {
    let err = "mul".parse::<Opcode>().unwrap_err();
    assert_eq!(err, InstructionParseError::UnknownCommand("mul".to_string()));
}
