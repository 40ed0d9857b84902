//! Unit tests for SourcePosition and SourceSpan

use core_types::{SourcePosition, SourceSpan};

#[test]
fn test_position_start_is_line_one_column_one() {
    let pos = SourcePosition::start();
    assert_eq!(pos.line, 1);
    assert_eq!(pos.column, 1);
    assert_eq!(pos.offset, 0);
}

#[test]
fn test_position_default_matches_start() {
    assert_eq!(SourcePosition::default(), SourcePosition::start());
}

#[test]
fn test_position_display() {
    let pos = SourcePosition::new(12, 4, 200);
    assert_eq!(format!("{}", pos), "line 12, column 4");
}

#[test]
fn test_position_is_copy() {
    let pos = SourcePosition::new(1, 2, 1);
    let copy = pos;
    assert_eq!(pos, copy);
}

#[test]
fn test_single_byte_span() {
    let pos = SourcePosition::new(3, 9, 30);
    let span = SourceSpan::new(pos, pos);
    assert_eq!(span.start, span.end);
}

#[test]
fn test_multi_byte_span() {
    let span = SourceSpan::new(SourcePosition::new(1, 1, 0), SourcePosition::new(1, 5, 4));
    assert_eq!(span.start.offset, 0);
    assert_eq!(span.end.offset, 4);
}
