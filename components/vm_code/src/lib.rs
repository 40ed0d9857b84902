//! Intermediate instruction language for the Jack compiler
//!
//! This crate models the stack-machine instruction set that the code
//! generator emits and the downstream translator consumes. Rendering an
//! instruction with `Display` produces exactly the line the translator
//! expects; [`Opcode::from_str`](std::str::FromStr) parses such a line back.
//!
//! # Example
//!
//! ```
//! use vm_code::{Opcode, Segment, VmChunk};
//!
//! let mut chunk = VmChunk::new();
//! chunk.emit(Opcode::Function { name: "Main.main".to_string(), n_locals: 0 });
//! chunk.emit(Opcode::Push(Segment::Constant, 7));
//! chunk.emit(Opcode::Return);
//!
//! assert_eq!(chunk.to_text(), "function Main.main 0\npush constant 7\nreturn\n");
//!
//! let restored = VmChunk::parse(&chunk.to_text()).unwrap();
//! assert_eq!(restored, chunk);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod opcode;

// Re-export main types at crate root
pub use chunk::VmChunk;
pub use opcode::{InstructionParseError, Opcode, Segment};
