//! Abstract Syntax Tree node definitions
//!
//! Every node renders as an S-expression through `Display`.

use std::fmt;

use core_types::SourcePosition;

use crate::lexer::Symbol;

/// A class: the root of every source file
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Class name
    pub name: String,
    /// Members in declaration order
    pub members: Vec<ClassMember>,
    /// Source location
    pub position: Option<SourcePosition>,
}

impl Class {
    /// Static variable declarations in declaration order
    pub fn statics(&self) -> impl Iterator<Item = &VarDeclaration> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Static(decl) => Some(decl),
            _ => None,
        })
    }

    /// Field declarations in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &VarDeclaration> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Field(decl) => Some(decl),
            _ => None,
        })
    }

    /// Functions, methods and constructors in declaration order
    pub fn subroutines(&self) -> impl Iterator<Item = &Subroutine> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Subroutine(sub) => Some(sub),
            _ => None,
        })
    }
}

/// Class body elements
#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    /// `static` variable declaration
    Static(VarDeclaration),
    /// `field` variable declaration
    Field(VarDeclaration),
    /// Function, method or constructor
    Subroutine(Subroutine),
}

/// One or more variables sharing a type
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    /// Declared type
    pub ty: Type,
    /// Declared names, never empty
    pub names: Vec<String>,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// Declared types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// int
    Int,
    /// char
    Char,
    /// boolean
    Boolean,
    /// void (return types only)
    Void,
    /// A class name
    Class(String),
}

impl Type {
    /// Name of the type as written in source
    pub fn name(&self) -> &str {
        match self {
            Type::Int => "int",
            Type::Char => "char",
            Type::Boolean => "boolean",
            Type::Void => "void",
            Type::Class(name) => name,
        }
    }
}

/// Subroutine kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    /// Class-level routine with no receiver
    Function,
    /// Routine invoked on a receiver
    Method,
    /// Routine that allocates and returns a new instance
    Constructor,
}

impl SubroutineKind {
    /// Whether the routine body has a receiver in `pointer 0`
    pub fn has_receiver(self) -> bool {
        !matches!(self, SubroutineKind::Function)
    }
}

/// A routine parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Declared type
    pub ty: Type,
    /// Parameter name
    pub name: String,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// Function, method or constructor
#[derive(Debug, Clone, PartialEq)]
pub struct Subroutine {
    /// Routine kind
    pub kind: SubroutineKind,
    /// Declared return type
    pub return_type: Type,
    /// Routine name
    pub name: String,
    /// Declared parameters
    pub parameters: Vec<Parameter>,
    /// Routine body
    pub body: Block,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// A braced statement list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

/// Jack statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var` declaration
    Var(VarDeclaration),

    /// Assignment, optionally through an array index
    Let {
        /// Assigned variable
        name: String,
        /// Array index, if assigning an element
        index: Option<Expression>,
        /// Assigned value
        value: Expression,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// If statement
    If {
        /// Condition
        condition: Expression,
        /// Block run when the condition holds
        then_block: Block,
        /// Optional else block
        else_block: Option<Block>,
    },

    /// While loop
    While {
        /// Loop condition
        condition: Expression,
        /// Loop body
        body: Block,
    },

    /// Call with the result discarded
    Do {
        /// The call expression
        call: Expression,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Return statement
    Return {
        /// Return value
        value: Option<Expression>,
        /// Source location
        position: Option<SourcePosition>,
    },
}

/// Binary operators. All share one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// +
    Add,
    /// -
    Subtract,
    /// *
    Multiply,
    /// /
    Divide,
    /// &
    And,
    /// |
    Or,
    /// <
    LessThan,
    /// >
    GreaterThan,
    /// =
    Equal,
}

impl BinaryOperator {
    /// The operator spelled by a symbol, if any
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        Some(match symbol {
            Symbol::Plus => BinaryOperator::Add,
            Symbol::Minus => BinaryOperator::Subtract,
            Symbol::Star => BinaryOperator::Multiply,
            Symbol::Slash => BinaryOperator::Divide,
            Symbol::And => BinaryOperator::And,
            Symbol::Or => BinaryOperator::Or,
            Symbol::Lt => BinaryOperator::LessThan,
            Symbol::Gt => BinaryOperator::GreaterThan,
            Symbol::Eq => BinaryOperator::Equal,
            _ => return None,
        })
    }

    /// Source text of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::And => "&",
            BinaryOperator::Or => "|",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::Equal => "=",
        }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (-)
    Negate,
    /// Bitwise not (~)
    Not,
}

impl UnaryOperator {
    /// Source text of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "~",
        }
    }
}

/// Jack expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal in 0..=32767
    Constant {
        /// Literal value
        value: u16,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `true` or `false`
    Boolean(bool),

    /// String literal
    String(String),

    /// `null`
    Null,

    /// `this`
    This {
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Variable reference
    Reference {
        /// Variable name
        name: String,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Binary operation
    Operator {
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location of the operator
        position: Option<SourcePosition>,
    },

    /// Prefix operation
    Unary {
        /// Operator
        operator: UnaryOperator,
        /// Operand
        operand: Box<Expression>,
    },

    /// `name(args)`, a call on the current class
    Call {
        /// Routine name
        name: String,
        /// Arguments
        arguments: Vec<Expression>,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `receiver.method(args)`
    MethodCall {
        /// Variable, class name or `this`
        receiver: Box<Expression>,
        /// Routine name
        method: String,
        /// Arguments
        arguments: Vec<Expression>,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `target[index]`
    Index {
        /// Array expression
        target: Box<Expression>,
        /// Index expression
        index: Box<Expression>,
    },
}

impl Expression {
    /// Source position of the expression, where one is recorded
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            Expression::Constant { position, .. }
            | Expression::This { position }
            | Expression::Reference { position, .. }
            | Expression::Operator { position, .. }
            | Expression::Call { position, .. }
            | Expression::MethodCall { position, .. } => *position,
            Expression::Unary { operand, .. } => operand.position(),
            Expression::Index { target, .. } => target.position(),
            Expression::Boolean(_) | Expression::String(_) | Expression::Null => None,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for item in items {
        write!(f, " {}", item)?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SubroutineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubroutineKind::Function => "function",
            SubroutineKind::Method => "method",
            SubroutineKind::Constructor => "constructor",
        })
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(class {}", self.name)?;
        write_list(f, &self.members)?;
        write!(f, ")")
    }
}

impl fmt::Display for ClassMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassMember::Static(decl) => write!(f, "(static {})", decl),
            ClassMember::Field(decl) => write!(f, "(field {})", decl),
            ClassMember::Subroutine(sub) => write!(f, "{}", sub),
        }
    }
}

impl fmt::Display for VarDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        write_list(f, &self.names)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.ty, self.name)
    }
}

impl fmt::Display for Subroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {} (", self.kind, self.return_type, self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") {})", self.body)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(block")?;
        write_list(f, &self.statements)?;
        write!(f, ")")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Var(decl) => write!(f, "(var {})", decl),
            Statement::Let {
                name,
                index: None,
                value,
                ..
            } => write!(f, "(let {} {})", name, value),
            Statement::Let {
                name,
                index: Some(index),
                value,
                ..
            } => write!(f, "(let (index {} {}) {})", name, index, value),
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                write!(f, "(if {} {}", condition, then_block)?;
                if let Some(else_block) = else_block {
                    write!(f, " {}", else_block)?;
                }
                write!(f, ")")
            }
            Statement::While { condition, body } => write!(f, "(while {} {})", condition, body),
            Statement::Do { call, .. } => write!(f, "(do {})", call),
            Statement::Return { value: None, .. } => write!(f, "(return)"),
            Statement::Return {
                value: Some(value), ..
            } => write!(f, "(return {})", value),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant { value, .. } => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::String(value) => write!(f, "\"{}\"", value),
            Expression::Null => write!(f, "null"),
            Expression::This { .. } => write!(f, "this"),
            Expression::Reference { name, .. } => write!(f, "{}", name),
            Expression::Operator {
                operator,
                left,
                right,
                ..
            } => write!(f, "({} {} {})", operator.as_str(), left, right),
            Expression::Unary { operator, operand } => {
                write!(f, "({} {})", operator.as_str(), operand)
            }
            Expression::Call {
                name, arguments, ..
            } => {
                write!(f, "(call {}", name)?;
                write_list(f, arguments)?;
                write!(f, ")")
            }
            Expression::MethodCall {
                receiver,
                method,
                arguments,
                ..
            } => {
                write!(f, "(call {}.{}", receiver, method)?;
                write_list(f, arguments)?;
                write!(f, ")")
            }
            Expression::Index { target, index } => write!(f, "(index {} {})", target, index),
        }
    }
}
