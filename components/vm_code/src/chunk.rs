//! VM chunk - an ordered sequence of instructions
//!
//! The code generator writes one chunk per class; each routine body is first
//! generated into a private chunk that is spliced in once complete.

use crate::opcode::{InstructionParseError, Opcode};
use std::fmt;

/// An ordered sequence of intermediate-language instructions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VmChunk {
    /// Sequence of instructions in emission order
    pub instructions: Vec<Opcode>,
}

impl VmChunk {
    /// Create a new empty chunk
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Append one instruction
    pub fn emit(&mut self, opcode: Opcode) {
        self.instructions.push(opcode);
    }

    /// Move every instruction of `other` onto the end of this chunk
    pub fn append(&mut self, other: &mut VmChunk) {
        self.instructions.append(&mut other.instructions);
    }

    /// Get the number of instructions
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Check whether nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of `function` directives, i.e. routines in the chunk
    pub fn routine_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|opcode| matches!(opcode, Opcode::Function { .. }))
            .count()
    }

    /// Render each instruction as one line of text
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(|op| op.to_string()).collect()
    }

    /// Render the chunk as instruction text, each line terminated by `\n`
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Parse instruction text back into a chunk
    ///
    /// Blank lines and `//` comments are skipped. The error carries the
    /// 1-based line number of the first malformed line.
    pub fn parse(text: &str) -> Result<Self, (usize, InstructionParseError)> {
        let mut chunk = VmChunk::new();
        for (number, line) in text.lines().enumerate() {
            let line = match line.find("//") {
                Some(comment) => &line[..comment],
                None => line,
            }
            .trim();
            if line.is_empty() {
                continue;
            }
            let opcode = line.parse::<Opcode>().map_err(|e| (number + 1, e))?;
            chunk.emit(opcode);
        }
        Ok(chunk)
    }
}

impl fmt::Display for VmChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for opcode in &self.instructions {
            writeln!(f, "{}", opcode)?;
        }
        Ok(())
    }
}

impl Extend<Opcode> for VmChunk {
    fn extend<T: IntoIterator<Item = Opcode>>(&mut self, iter: T) {
        self.instructions.extend(iter);
    }
}

impl FromIterator<Opcode> for VmChunk {
    fn from_iter<T: IntoIterator<Item = Opcode>>(iter: T) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}
