//! Parser error types and helpers

use core_types::{CompileError, ErrorKind, SourcePosition};

/// Text reported as `found` when the token stream runs dry
pub const END_OF_INPUT: &str = "end of input";

/// Create a lexical error for an unrecognized fragment
pub fn lexical_error(fragment: &str, position: SourcePosition) -> CompileError {
    CompileError::new(
        ErrorKind::LexicalError,
        format!("unrecognized input '{}'", fragment),
        Some(position),
    )
    .with_found(fragment)
}

/// Create an unexpected token error
pub fn unexpected_token(expected: &str, found: &str, position: Option<SourcePosition>) -> CompileError {
    CompileError::new(
        ErrorKind::ParseError,
        format!("expected {} but found {}", expected, found),
        position,
    )
    .with_found(found)
    .with_expected(expected)
}

/// Create an unexpected end of input error
pub fn unexpected_eof(expected: &str, position: Option<SourcePosition>) -> CompileError {
    unexpected_token(expected, END_OF_INPUT, position)
}

/// Create an error for tokens left over after the class body
pub fn trailing_token(found: &str, position: SourcePosition) -> CompileError {
    CompileError::new(
        ErrorKind::ParseError,
        format!("unexpected {} after end of class", found),
        Some(position),
    )
    .with_found(found)
    .with_expected(END_OF_INPUT)
}

/// Create an error for a name missing from every applicable scope
pub fn unresolved_name(name: &str, position: Option<SourcePosition>) -> CompileError {
    CompileError::new(
        ErrorKind::NameResolutionError,
        format!("cannot resolve '{}'", name),
        position,
    )
    .with_found(name)
}

/// Create an error for a method call on a variable of primitive type
pub fn not_an_object(name: &str, type_name: &str, position: Option<SourcePosition>) -> CompileError {
    CompileError::new(
        ErrorKind::NameResolutionError,
        format!("'{}' has type {} and no methods", name, type_name),
        position,
    )
    .with_found(name)
}

/// Create an error for an AST shape with no code generation rule
pub fn unsupported(construct: &str, position: Option<SourcePosition>) -> CompileError {
    CompileError::new(
        ErrorKind::UnsupportedConstructError,
        format!("no code generation rule for {}", construct),
        position,
    )
    .with_found(construct)
}
