//! Core types shared by every stage of the Jack compiler.
//!
//! This crate provides the foundational types for the compiler front end:
//! source location tracking and the error taxonomy that all stages report
//! through.
//!
//! # Overview
//!
//! - [`SourcePosition`] - A single location in a source file
//! - [`SourceSpan`] - The first and last position covered by a lexeme
//! - [`CompileError`] - An error raised by any stage of compilation
//! - [`ErrorKind`] - Which stage (or fault class) raised an error
//!
//! # Examples
//!
//! ```
//! use core_types::{CompileError, ErrorKind, SourcePosition};
//!
//! let error = CompileError::new(
//!     ErrorKind::ParseError,
//!     "expected '}'",
//!     Some(SourcePosition::new(3, 1, 42)),
//! )
//! .with_expected("'}'")
//! .with_found("end of input");
//!
//! assert_eq!(error.kind, ErrorKind::ParseError);
//! assert_eq!(error.expected.as_deref(), Some("'}'"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{CompileError, CompileResult, ErrorKind};
pub use source::{SourcePosition, SourceSpan};
