//! Compiler error types.
//!
//! Every stage reports failure through [`CompileError`]. The first error
//! aborts compilation of the file, so there is no aggregation here.

use crate::SourcePosition;
use std::fmt;
use thiserror::Error;

/// The kind of compile error.
///
/// The first three are user errors. `UnsupportedConstructError` marks an AST
/// shape that the parser should never have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognized character sequence in the source
    LexicalError,
    /// Expected-vs-found token mismatch, trailing tokens or running out of tokens
    ParseError,
    /// Identifier not found in any applicable scope
    NameResolutionError,
    /// An AST shape with no code generation rule (internal fault)
    UnsupportedConstructError,
}

impl ErrorKind {
    /// Whether this kind signals a fault in the compiler rather than in the program
    pub fn is_internal(&self) -> bool {
        matches!(self, ErrorKind::UnsupportedConstructError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::LexicalError => "lexical error",
            ErrorKind::ParseError => "parse error",
            ErrorKind::NameResolutionError => "name resolution error",
            ErrorKind::UnsupportedConstructError => "unsupported construct",
        };
        f.write_str(name)
    }
}

/// A compile error with enough context to build a user-facing message.
///
/// # Examples
///
/// ```
/// use core_types::{CompileError, ErrorKind};
///
/// let error = CompileError::new(ErrorKind::NameResolutionError, "unknown name 'x'", None)
///     .with_found("x");
///
/// assert_eq!(error.to_string(), "name resolution error: unknown name 'x'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}{}", at_position(.source_position))]
pub struct CompileError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The offending text or token, if any
    pub found: Option<String>,
    /// The expected alternative, if any
    pub expected: Option<String>,
    /// Source position where the error was detected
    pub source_position: Option<SourcePosition>,
}

impl CompileError {
    /// Create an error with no found/expected detail
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        source_position: Option<SourcePosition>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            found: None,
            expected: None,
            source_position,
        }
    }

    /// Attach the offending text
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// Attach the expected alternative
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

fn at_position(position: &Option<SourcePosition>) -> String {
    match position {
        Some(position) => format!(" at {}", position),
        None => String::new(),
    }
}

/// Result type for compiler operations
pub type CompileResult<T> = Result<T, CompileError>;
