//! Jack Compiler Front End
//!
//! Provides lexer, parser, AST construction, symbol tables, and VM code
//! generation for Jack classes.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes Jack source with competing recognizers
//! - [`TokenStream`] - One-token lookahead over significant tokens
//! - [`Parser`] - Recursive descent parser producing a [`Class`] AST
//! - [`SymbolTable`] - Slot assignment per storage class
//! - [`VmGenerator`] - Converts a class AST to VM instructions
//!
//! # Example
//!
//! ```
//! use parser::{Parser, VmGenerator};
//!
//! let source = "class Main { function void main() { return; } }";
//! let mut parser = Parser::new(source);
//! let class = parser.parse_class().unwrap();
//!
//! let mut gen = VmGenerator::new();
//! let chunk = gen.generate(&class).unwrap();
//! assert_eq!(chunk.to_text(), "function Main.main 0\npush constant 0\nreturn\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod recognizer;
pub mod scope;
pub mod token_stream;
pub mod vm_gen;

pub use ast::{Class, ClassMember, Expression, Statement, Subroutine, SubroutineKind, Type};
pub use lexer::{Keyword, Lexer, Symbol, Token, TokenKind};
pub use parser::Parser;
pub use recognizer::Recognizer;
pub use scope::{RoutineScope, StorageClass, SymbolTable};
pub use token_stream::TokenStream;
pub use vm_gen::VmGenerator;

use core_types::CompileResult;
use vm_code::VmChunk;

/// Tokenize a source file, whitespace and comments included
pub fn tokenize(source: &str) -> CompileResult<Vec<Token>> {
    Lexer::new(source).collect()
}

/// Compile one class from source to VM instructions
pub fn compile(source: &str) -> CompileResult<VmChunk> {
    let class = Parser::new(source).parse_class()?;
    VmGenerator::new().generate(&class)
}
