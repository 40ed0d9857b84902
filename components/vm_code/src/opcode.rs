//! Instruction vocabulary of the intermediate stack machine.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named storage region addressed by `push` and `pop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Virtual constant pool (push only)
    Constant,
    /// Slots of the current routine's local frame
    Local,
    /// Slots of the current routine's arguments
    Argument,
    /// Fields of the active object (based at `pointer 0`)
    This,
    /// Cells of the secondary object or array (based at `pointer 1`)
    That,
    /// The two base registers for `this` and `that`
    Pointer,
    /// Scratch slots
    Temp,
    /// Per-class static slots
    Static,
}

impl Segment {
    /// Every segment, in instruction-reference order
    pub const ALL: [Segment; 8] = [
        Segment::Constant,
        Segment::Local,
        Segment::Argument,
        Segment::This,
        Segment::That,
        Segment::Pointer,
        Segment::Temp,
        Segment::Static,
    ];

    /// The segment's name as it appears in instruction text
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Local => "local",
            Segment::Argument => "argument",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
            Segment::Static => "static",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single instruction of the intermediate language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Memory access
    /// Push the value at `segment[index]`
    Push(Segment, u16),
    /// Pop the top of the stack into `segment[index]`
    Pop(Segment, u16),

    // Arithmetic and logic
    /// Integer addition
    Add,
    /// Integer subtraction (second-top minus top)
    Sub,
    /// Arithmetic negation
    Neg,
    /// Equality, producing true (-1) or false (0)
    Eq,
    /// Greater than (second-top > top)
    Gt,
    /// Less than (second-top < top)
    Lt,
    /// Bitwise and
    And,
    /// Bitwise or
    Or,
    /// Bitwise not
    Not,

    // Control flow
    /// Declare a jump target
    Label(String),
    /// Unconditional jump
    Goto(String),
    /// Pop the top of the stack and jump if it is non-zero
    IfGoto(String),

    // Routines
    /// Open a routine with the given number of zero-initialised locals
    Function {
        /// Fully qualified name, `Class.routine`
        name: String,
        /// Number of local slots
        n_locals: u16,
    },
    /// Call a routine after pushing `n_args` arguments
    Call {
        /// Fully qualified name, `Class.routine`
        name: String,
        /// Number of arguments already pushed
        n_args: u16,
    },
    /// Return the top of the stack to the caller
    Return,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Push(segment, index) => write!(f, "push {} {}", segment, index),
            Opcode::Pop(segment, index) => write!(f, "pop {} {}", segment, index),
            Opcode::Add => f.write_str("add"),
            Opcode::Sub => f.write_str("sub"),
            Opcode::Neg => f.write_str("neg"),
            Opcode::Eq => f.write_str("eq"),
            Opcode::Gt => f.write_str("gt"),
            Opcode::Lt => f.write_str("lt"),
            Opcode::And => f.write_str("and"),
            Opcode::Or => f.write_str("or"),
            Opcode::Not => f.write_str("not"),
            Opcode::Label(name) => write!(f, "label {}", name),
            Opcode::Goto(name) => write!(f, "goto {}", name),
            Opcode::IfGoto(name) => write!(f, "if-goto {}", name),
            Opcode::Function { name, n_locals } => write!(f, "function {} {}", name, n_locals),
            Opcode::Call { name, n_args } => write!(f, "call {} {}", name, n_args),
            Opcode::Return => f.write_str("return"),
        }
    }
}

/// Error raised when a line of instruction text is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionParseError {
    /// The command word is not part of the instruction language
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// A segment name is not one of the eight segments
    #[error("unknown segment '{0}'")]
    UnknownSegment(String),
    /// A numeric operand is missing or out of range
    #[error("invalid operand '{operand}' for '{command}'")]
    InvalidOperand {
        /// Command being parsed
        command: String,
        /// The offending operand text
        operand: String,
    },
    /// Wrong number of operands for the command
    #[error("'{command}' takes {expected} operand(s), found {found}")]
    OperandCount {
        /// Command being parsed
        command: String,
        /// Operands the command takes
        expected: usize,
        /// Operands present
        found: usize,
    },
    /// `pop constant` has no meaning
    #[error("cannot pop into the constant segment")]
    PopConstant,
}

impl FromStr for Segment {
    type Err = InstructionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segment::ALL
            .iter()
            .copied()
            .find(|segment| segment.as_str() == s)
            .ok_or_else(|| InstructionParseError::UnknownSegment(s.to_string()))
    }
}

impl FromStr for Opcode {
    type Err = InstructionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let operands: Vec<&str> = words.collect();

        let expect = |expected: usize| {
            if operands.len() == expected {
                Ok(())
            } else {
                Err(InstructionParseError::OperandCount {
                    command: command.to_string(),
                    expected,
                    found: operands.len(),
                })
            }
        };
        let number = |operand: &str| {
            operand
                .parse::<u16>()
                .map_err(|_| InstructionParseError::InvalidOperand {
                    command: command.to_string(),
                    operand: operand.to_string(),
                })
        };

        let opcode = match command {
            "push" | "pop" => {
                expect(2)?;
                let segment: Segment = operands[0].parse()?;
                let index = number(operands[1])?;
                if command == "push" {
                    Opcode::Push(segment, index)
                } else if segment == Segment::Constant {
                    return Err(InstructionParseError::PopConstant);
                } else {
                    Opcode::Pop(segment, index)
                }
            }
            "label" | "goto" | "if-goto" => {
                expect(1)?;
                let name = operands[0].to_string();
                match command {
                    "label" => Opcode::Label(name),
                    "goto" => Opcode::Goto(name),
                    _ => Opcode::IfGoto(name),
                }
            }
            "function" => {
                expect(2)?;
                Opcode::Function {
                    name: operands[0].to_string(),
                    n_locals: number(operands[1])?,
                }
            }
            "call" => {
                expect(2)?;
                Opcode::Call {
                    name: operands[0].to_string(),
                    n_args: number(operands[1])?,
                }
            }
            _ => {
                let opcode = match command {
                    "add" => Opcode::Add,
                    "sub" => Opcode::Sub,
                    "neg" => Opcode::Neg,
                    "eq" => Opcode::Eq,
                    "gt" => Opcode::Gt,
                    "lt" => Opcode::Lt,
                    "and" => Opcode::And,
                    "or" => Opcode::Or,
                    "not" => Opcode::Not,
                    "return" => Opcode::Return,
                    other => return Err(InstructionParseError::UnknownCommand(other.to_string())),
                };
                expect(0)?;
                opcode
            }
        };

        Ok(opcode)
    }
}
