//! VM code generation from AST
//!
//! Generation runs in two passes over a class: statics and fields are
//! registered first, then each routine is generated in declaration order.
//! A routine body is generated into its own chunk and spliced in after the
//! `function` directive once the local count is known.

use core_types::{CompileResult, SourcePosition};
use vm_code::{Opcode, Segment, VmChunk};

use crate::ast::*;
use crate::error::{not_an_object, unresolved_name, unsupported};
use crate::scope::{RoutineScope, StorageClass, SymbolTable};

const IF_ELSE: &str = "IF_ELSE";
const IF_DONE: &str = "IF_DONE";
const WHILE_START: &str = "WHILE_START";
const WHILE_END: &str = "WHILE_END";

fn is_primitive(type_name: &str) -> bool {
    matches!(type_name, "int" | "char" | "boolean")
}

/// VM code generator that converts a class AST to instructions
#[derive(Debug, Default)]
pub struct VmGenerator {
    output: VmChunk,
}

impl VmGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the instructions for every routine of a class
    pub fn generate(&mut self, class: &Class) -> CompileResult<VmChunk> {
        let mut class_table = SymbolTable::new();
        for member in &class.members {
            let (decl, storage) = match member {
                ClassMember::Static(decl) => (decl, StorageClass::Static),
                ClassMember::Field(decl) => (decl, StorageClass::Field),
                ClassMember::Subroutine(_) => continue,
            };
            for name in &decl.names {
                class_table.define(name, storage, decl.ty.name());
            }
        }

        for subroutine in class.subroutines() {
            let generator = RoutineGenerator::new(&class.name, &class_table, subroutine.kind);
            let mut routine = generator.generate(subroutine)?;
            self.output.append(&mut routine);
        }

        Ok(std::mem::take(&mut self.output))
    }
}

/// Generates one routine against the class symbol table
struct RoutineGenerator<'c> {
    class_name: &'c str,
    field_count: u16,
    kind: SubroutineKind,
    scope: RoutineScope<'c>,
    body: VmChunk,
    label_counter: usize,
}

impl<'c> RoutineGenerator<'c> {
    fn new(class_name: &'c str, class_table: &'c SymbolTable, kind: SubroutineKind) -> Self {
        Self {
            class_name,
            field_count: class_table.count(StorageClass::Field),
            kind,
            scope: RoutineScope::new(class_table, kind),
            body: VmChunk::new(),
            label_counter: 0,
        }
    }

    fn generate(mut self, subroutine: &Subroutine) -> CompileResult<VmChunk> {
        for param in &subroutine.parameters {
            self.scope.define_argument(&param.name, param.ty.name());
        }
        self.visit_block(&subroutine.body)?;

        let mut chunk = VmChunk::new();
        chunk.emit(Opcode::Function {
            name: self.qualified(&subroutine.name),
            n_locals: self.scope.local_count(),
        });
        match self.kind {
            SubroutineKind::Method => {
                chunk.emit(Opcode::Push(Segment::Argument, 0));
                chunk.emit(Opcode::Pop(Segment::Pointer, 0));
            }
            SubroutineKind::Constructor => {
                chunk.emit(Opcode::Push(Segment::Constant, self.field_count));
                chunk.emit(Opcode::Call {
                    name: "Memory.alloc".to_string(),
                    n_args: 1,
                });
                chunk.emit(Opcode::Pop(Segment::Pointer, 0));
            }
            SubroutineKind::Function => {}
        }
        chunk.append(&mut self.body);
        Ok(chunk)
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}.{}", self.class_name, name)
    }

    fn emit(&mut self, opcode: Opcode) {
        self.body.emit(opcode);
    }

    fn emit_call(&mut self, name: String, n_args: usize) {
        self.emit(Opcode::Call {
            name,
            n_args: n_args as u16,
        });
    }

    fn next_label_id(&mut self) -> usize {
        let id = self.label_counter;
        self.label_counter += 1;
        id
    }

    /// Segment and slot of a variable, or a name resolution error
    fn lookup(
        &self,
        name: &str,
        position: Option<SourcePosition>,
    ) -> CompileResult<(Segment, u16)> {
        self.scope
            .resolve(name)
            .map(|symbol| (symbol.storage.segment(), symbol.index))
            .ok_or_else(|| unresolved_name(name, position))
    }

    /// Push the current object; a function has none
    fn receiver(&mut self, position: Option<SourcePosition>) -> CompileResult<()> {
        if !self.kind.has_receiver() {
            return Err(unresolved_name("this", position));
        }
        self.emit(Opcode::Push(Segment::Pointer, 0));
        Ok(())
    }

    fn visit_block(&mut self, block: &Block) -> CompileResult<()> {
        for stmt in &block.statements {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, stmt: &Statement) -> CompileResult<()> {
        match stmt {
            Statement::Var(decl) => {
                for name in &decl.names {
                    self.scope.define_local(name, decl.ty.name());
                }
            }

            Statement::Let {
                name,
                index: None,
                value,
                position,
            } => {
                self.visit_expression(value)?;
                let (segment, slot) = self.lookup(name, *position)?;
                self.emit(Opcode::Pop(segment, slot));
            }

            Statement::Let {
                name,
                index: Some(index),
                value,
                position,
            } => {
                // value stays on the stack underneath the element address
                self.visit_expression(value)?;
                let (segment, slot) = self.lookup(name, *position)?;
                self.emit(Opcode::Push(segment, slot));
                self.visit_expression(index)?;
                self.emit(Opcode::Add);
                self.emit(Opcode::Pop(Segment::Pointer, 1));
                self.emit(Opcode::Pop(Segment::That, 0));
            }

            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                let id = self.next_label_id();
                let else_label = format!("{}_{}", IF_ELSE, id);
                let done_label = format!("{}_{}", IF_DONE, id);

                self.visit_expression(condition)?;
                self.emit(Opcode::Not);
                let target = if else_block.is_some() {
                    else_label.clone()
                } else {
                    done_label.clone()
                };
                self.emit(Opcode::IfGoto(target));
                self.visit_block(then_block)?;
                if let Some(else_block) = else_block {
                    self.emit(Opcode::Goto(done_label.clone()));
                    self.emit(Opcode::Label(else_label));
                    self.visit_block(else_block)?;
                }
                self.emit(Opcode::Label(done_label));
            }

            Statement::While { condition, body } => {
                let id = self.next_label_id();
                let start_label = format!("{}_{}", WHILE_START, id);
                let end_label = format!("{}_{}", WHILE_END, id);

                self.emit(Opcode::Label(start_label.clone()));
                self.visit_expression(condition)?;
                self.emit(Opcode::Not);
                self.emit(Opcode::IfGoto(end_label.clone()));
                self.visit_block(body)?;
                self.emit(Opcode::Goto(start_label));
                self.emit(Opcode::Label(end_label));
            }

            Statement::Do { call, .. } => {
                self.visit_expression(call)?;
                self.emit(Opcode::Pop(Segment::Temp, 0));
            }

            Statement::Return { value, .. } => {
                match value {
                    Some(value) => self.visit_expression(value)?,
                    None => self.emit(Opcode::Push(Segment::Constant, 0)),
                }
                self.emit(Opcode::Return);
            }
        }
        Ok(())
    }

    fn visit_expression(&mut self, expr: &Expression) -> CompileResult<()> {
        match expr {
            Expression::Constant { value, .. } => {
                self.emit(Opcode::Push(Segment::Constant, *value));
            }

            Expression::Boolean(value) => {
                self.emit(Opcode::Push(Segment::Constant, 0));
                if *value {
                    // all ones on a 16-bit word
                    self.emit(Opcode::Not);
                }
            }

            Expression::String(value) => {
                let length = u16::try_from(value.len())
                    .map_err(|_| unsupported("string constant longer than a word", None))?;
                self.emit(Opcode::Push(Segment::Constant, length));
                self.emit_call("String.new".to_string(), 1);
                for byte in value.bytes() {
                    self.emit(Opcode::Push(Segment::Constant, u16::from(byte)));
                    self.emit_call("String.appendChar".to_string(), 2);
                }
            }

            Expression::Null => {
                self.emit(Opcode::Push(Segment::Constant, 0));
            }

            Expression::This { position } => {
                self.receiver(*position)?;
            }

            Expression::Reference { name, position } => {
                let (segment, slot) = self.lookup(name, *position)?;
                self.emit(Opcode::Push(segment, slot));
            }

            Expression::Operator {
                operator,
                left,
                right,
                ..
            } => {
                self.visit_expression(left)?;
                self.visit_expression(right)?;
                match operator {
                    BinaryOperator::Add => self.emit(Opcode::Add),
                    BinaryOperator::Subtract => self.emit(Opcode::Sub),
                    BinaryOperator::Multiply => self.emit_call("Math.multiply".to_string(), 2),
                    BinaryOperator::Divide => self.emit_call("Math.divide".to_string(), 2),
                    BinaryOperator::And => self.emit(Opcode::And),
                    BinaryOperator::Or => self.emit(Opcode::Or),
                    BinaryOperator::LessThan => self.emit(Opcode::Lt),
                    BinaryOperator::GreaterThan => self.emit(Opcode::Gt),
                    BinaryOperator::Equal => self.emit(Opcode::Eq),
                }
            }

            Expression::Unary { operator, operand } => {
                self.visit_expression(operand)?;
                match operator {
                    UnaryOperator::Negate => self.emit(Opcode::Neg),
                    UnaryOperator::Not => self.emit(Opcode::Not),
                }
            }

            Expression::Call {
                name, arguments, ..
            } => {
                // a bare call targets the current object when there is one
                let receiver = self.kind.has_receiver();
                if receiver {
                    self.emit(Opcode::Push(Segment::Pointer, 0));
                }
                self.visit_arguments(arguments)?;
                let n_args = arguments.len() + usize::from(receiver);
                self.emit_call(self.qualified(name), n_args);
            }

            Expression::MethodCall {
                receiver,
                method,
                arguments,
                position,
            } => match receiver.as_ref() {
                Expression::This { position } => {
                    self.receiver(*position)?;
                    self.visit_arguments(arguments)?;
                    self.emit_call(self.qualified(method), arguments.len() + 1);
                }
                Expression::Reference {
                    name,
                    position: name_position,
                } => {
                    let target = self
                        .scope
                        .resolve(name)
                        .map(|s| (s.storage.segment(), s.index, s.type_name.clone()));
                    match target {
                        Some((_, _, type_name)) if is_primitive(&type_name) => {
                            return Err(not_an_object(name, &type_name, *name_position));
                        }
                        Some((segment, slot, type_name)) => {
                            self.emit(Opcode::Push(segment, slot));
                            self.visit_arguments(arguments)?;
                            self.emit_call(format!("{}.{}", type_name, method), arguments.len() + 1);
                        }
                        None => {
                            // not a variable, so a function on another class
                            self.visit_arguments(arguments)?;
                            self.emit_call(format!("{}.{}", name, method), arguments.len());
                        }
                    }
                }
                _ => return Err(unsupported("method call on a computed receiver", *position)),
            },

            Expression::Index { target, index } => {
                self.visit_expression(target)?;
                self.visit_expression(index)?;
                self.emit(Opcode::Add);
                self.emit(Opcode::Pop(Segment::Pointer, 1));
                self.emit(Opcode::Push(Segment::That, 0));
            }
        }
        Ok(())
    }

    fn visit_arguments(&mut self, arguments: &[Expression]) -> CompileResult<()> {
        for argument in arguments {
            self.visit_expression(argument)?;
        }
        Ok(())
    }
}
