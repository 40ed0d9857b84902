//! Recursive descent parser for Jack
//!
//! One token of lookahead, no backtracking and no error recovery: the first
//! mismatch aborts the parse.

use core_types::{CompileError, CompileResult, SourcePosition};

use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Symbol, Token, TokenKind};
use crate::token_stream::TokenStream;

/// Largest integer literal the target word can hold
pub const MAX_INTEGER_CONSTANT: u16 = 32767;

/// Jack parser
pub struct Parser<'a> {
    tokens: TokenStream<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code
    pub fn new(source: &'a str) -> Self {
        Self::from_tokens(TokenStream::new(source))
    }

    /// Create a parser over an existing token stream
    pub fn from_tokens(tokens: TokenStream<'a>) -> Self {
        Self { tokens }
    }

    /// Parse a complete source file: one class and nothing after it
    pub fn parse_class(&mut self) -> CompileResult<Class> {
        let class = self.parse_class_declaration()?;
        self.finish()?;
        Ok(class)
    }

    /// Fail if any significant token remains
    pub fn finish(&mut self) -> CompileResult<()> {
        match self.tokens.lookahead()? {
            None => Ok(()),
            Some(token) => Err(trailing_token(&token.to_string(), token.position())),
        }
    }

    fn parse_class_declaration(&mut self) -> CompileResult<Class> {
        let position = self.expect_keyword(Keyword::Class)?.position();
        let (name, _) = self.expect_identifier()?;
        self.expect_symbol(Symbol::LBrace)?;

        let mut members = Vec::new();
        while !self.check_symbol(Symbol::RBrace)? {
            if self.tokens.is_exhausted()? {
                return Err(self.unexpected(&TokenKind::Symbol(Symbol::RBrace).to_string()));
            }
            members.push(self.parse_class_member()?);
        }
        self.expect_symbol(Symbol::RBrace)?;

        Ok(Class {
            name,
            members,
            position: Some(position),
        })
    }

    fn parse_class_member(&mut self) -> CompileResult<ClassMember> {
        match self.peek_kind()? {
            Some(TokenKind::Keyword(Keyword::Static)) => {
                Ok(ClassMember::Static(self.parse_var_declaration(Keyword::Static)?))
            }
            Some(TokenKind::Keyword(Keyword::Field)) => {
                Ok(ClassMember::Field(self.parse_var_declaration(Keyword::Field)?))
            }
            Some(TokenKind::Keyword(
                Keyword::Function | Keyword::Method | Keyword::Constructor,
            )) => Ok(ClassMember::Subroutine(self.parse_subroutine()?)),
            _ => Err(self.unexpected("class member")),
        }
    }

    /// `keyword type name (, name)* ;` for static, field and var
    fn parse_var_declaration(&mut self, keyword: Keyword) -> CompileResult<VarDeclaration> {
        let position = self.expect_keyword(keyword)?.position();
        let ty = self.parse_type(false)?;

        let (first, _) = self.expect_identifier()?;
        let mut names = vec![first];
        while self.check_symbol(Symbol::Comma)? {
            self.tokens.consume()?;
            names.push(self.expect_identifier()?.0);
        }
        self.expect_symbol(Symbol::Semicolon)?;

        Ok(VarDeclaration {
            ty,
            names,
            position: Some(position),
        })
    }

    fn parse_type(&mut self, allow_void: bool) -> CompileResult<Type> {
        let ty = match self.peek_kind()? {
            Some(TokenKind::Keyword(Keyword::Int)) => Type::Int,
            Some(TokenKind::Keyword(Keyword::Char)) => Type::Char,
            Some(TokenKind::Keyword(Keyword::Boolean)) => Type::Boolean,
            Some(TokenKind::Keyword(Keyword::Void)) if allow_void => Type::Void,
            Some(TokenKind::Identifier) => {
                let (name, _) = self.expect_identifier()?;
                return Ok(Type::Class(name));
            }
            _ => return Err(self.unexpected("type")),
        };
        self.tokens.consume()?;
        Ok(ty)
    }

    fn parse_subroutine(&mut self) -> CompileResult<Subroutine> {
        let token = self.tokens.consume()?;
        let kind = match token.kind {
            TokenKind::Keyword(Keyword::Function) => SubroutineKind::Function,
            TokenKind::Keyword(Keyword::Method) => SubroutineKind::Method,
            TokenKind::Keyword(Keyword::Constructor) => SubroutineKind::Constructor,
            _ => {
                return Err(unexpected_token(
                    "subroutine",
                    &token.to_string(),
                    Some(token.position()),
                ))
            }
        };
        let return_type = self.parse_type(kind != SubroutineKind::Constructor)?;
        let (name, _) = self.expect_identifier()?;

        self.expect_symbol(Symbol::LParen)?;
        let parameters = self.parse_parameters()?;
        self.expect_symbol(Symbol::RParen)?;
        let body = self.parse_block()?;

        Ok(Subroutine {
            kind,
            return_type,
            name,
            parameters,
            body,
            position: Some(token.position()),
        })
    }

    fn parse_parameters(&mut self) -> CompileResult<Vec<Parameter>> {
        let mut parameters = Vec::new();
        if self.check_symbol(Symbol::RParen)? {
            return Ok(parameters);
        }
        loop {
            let ty = self.parse_type(false)?;
            let (name, position) = self.expect_identifier()?;
            parameters.push(Parameter {
                ty,
                name,
                position: Some(position),
            });
            if !self.check_symbol(Symbol::Comma)? {
                break;
            }
            self.tokens.consume()?;
        }
        Ok(parameters)
    }

    fn parse_block(&mut self) -> CompileResult<Block> {
        self.expect_symbol(Symbol::LBrace)?;
        let mut statements = Vec::new();
        while !self.check_symbol(Symbol::RBrace)? {
            if self.tokens.is_exhausted()? {
                return Err(self.unexpected(&TokenKind::Symbol(Symbol::RBrace).to_string()));
            }
            statements.push(self.parse_statement()?);
        }
        self.expect_symbol(Symbol::RBrace)?;
        Ok(Block { statements })
    }

    /// Parse a single statement
    pub fn parse_statement(&mut self) -> CompileResult<Statement> {
        match self.peek_kind()? {
            Some(TokenKind::Keyword(Keyword::Var)) => {
                Ok(Statement::Var(self.parse_var_declaration(Keyword::Var)?))
            }
            Some(TokenKind::Keyword(Keyword::Let)) => self.parse_let_statement(),
            Some(TokenKind::Keyword(Keyword::Do)) => self.parse_do_statement(),
            Some(TokenKind::Keyword(Keyword::If)) => self.parse_if_statement(),
            Some(TokenKind::Keyword(Keyword::While)) => self.parse_while_statement(),
            Some(TokenKind::Keyword(Keyword::Return)) => self.parse_return_statement(),
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_let_statement(&mut self) -> CompileResult<Statement> {
        let position = self.expect_keyword(Keyword::Let)?.position();
        let (name, _) = self.expect_identifier()?;
        let index = if self.check_symbol(Symbol::LBracket)? {
            self.tokens.consume()?;
            let index = self.parse_expression()?;
            self.expect_symbol(Symbol::RBracket)?;
            Some(index)
        } else {
            None
        };
        self.expect_symbol(Symbol::Eq)?;
        let value = self.parse_expression()?;
        self.expect_symbol(Symbol::Semicolon)?;

        Ok(Statement::Let {
            name,
            index,
            value,
            position: Some(position),
        })
    }

    fn parse_do_statement(&mut self) -> CompileResult<Statement> {
        let position = self.expect_keyword(Keyword::Do)?.position();
        let call = self.parse_expression()?;
        self.expect_symbol(Symbol::Semicolon)?;
        Ok(Statement::Do {
            call,
            position: Some(position),
        })
    }

    fn parse_if_statement(&mut self) -> CompileResult<Statement> {
        self.expect_keyword(Keyword::If)?;
        self.expect_symbol(Symbol::LParen)?;
        let condition = self.parse_expression()?;
        self.expect_symbol(Symbol::RParen)?;
        let then_block = self.parse_block()?;

        let else_block = if self.check_keyword(Keyword::Else)? {
            self.tokens.consume()?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn parse_while_statement(&mut self) -> CompileResult<Statement> {
        self.expect_keyword(Keyword::While)?;
        self.expect_symbol(Symbol::LParen)?;
        let condition = self.parse_expression()?;
        self.expect_symbol(Symbol::RParen)?;
        let body = self.parse_block()?;
        Ok(Statement::While { condition, body })
    }

    fn parse_return_statement(&mut self) -> CompileResult<Statement> {
        let position = self.expect_keyword(Keyword::Return)?.position();
        let value = if self.check_symbol(Symbol::Semicolon)? {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_symbol(Symbol::Semicolon)?;
        Ok(Statement::Return {
            value,
            position: Some(position),
        })
    }

    /// Parse an expression: unary terms folded left to right by binary operators
    pub fn parse_expression(&mut self) -> CompileResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let (operator, position) = match self.tokens.lookahead()? {
                Some(Token {
                    kind: TokenKind::Symbol(symbol),
                    span,
                    ..
                }) => match BinaryOperator::from_symbol(*symbol) {
                    Some(operator) => (operator, span.start),
                    None => break,
                },
                _ => break,
            };
            self.tokens.consume()?;
            let right = self.parse_unary()?;
            left = Expression::Operator {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                position: Some(position),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CompileResult<Expression> {
        let operator = match self.peek_kind()? {
            Some(TokenKind::Symbol(Symbol::Minus)) => UnaryOperator::Negate,
            Some(TokenKind::Symbol(Symbol::Tilde)) => UnaryOperator::Not,
            _ => return self.parse_postfix(),
        };
        self.tokens.consume()?;
        let operand = self.parse_unary()?;
        Ok(Expression::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    /// A primary with at most one index suffix
    fn parse_postfix(&mut self) -> CompileResult<Expression> {
        let target = self.parse_primary()?;
        if !self.check_symbol(Symbol::LBracket)? {
            return Ok(target);
        }
        self.tokens.consume()?;
        let index = self.parse_expression()?;
        self.expect_symbol(Symbol::RBracket)?;
        Ok(Expression::Index {
            target: Box::new(target),
            index: Box::new(index),
        })
    }

    fn parse_primary(&mut self) -> CompileResult<Expression> {
        let kind = match self.peek_kind()? {
            Some(kind) => kind,
            None => return Err(self.unexpected("expression")),
        };

        match kind {
            TokenKind::IntegerConstant => {
                let token = self.tokens.consume()?;
                let value = token
                    .value
                    .parse::<u16>()
                    .ok()
                    .filter(|v| *v <= MAX_INTEGER_CONSTANT)
                    .ok_or_else(|| {
                        unexpected_token(
                            &format!("integer constant in 0..={}", MAX_INTEGER_CONSTANT),
                            &token.value,
                            Some(token.position()),
                        )
                    })?;
                Ok(Expression::Constant {
                    value,
                    position: Some(token.position()),
                })
            }
            TokenKind::StringConstant => {
                let token = self.tokens.consume()?;
                // the length is pushed as a constant
                if token.value.len() > usize::from(MAX_INTEGER_CONSTANT) {
                    return Err(unexpected_token(
                        &format!("string constant of at most {} bytes", MAX_INTEGER_CONSTANT),
                        &format!("string constant of {} bytes", token.value.len()),
                        Some(token.position()),
                    ));
                }
                Ok(Expression::String(token.value))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.tokens.consume()?;
                Ok(Expression::Boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.tokens.consume()?;
                Ok(Expression::Boolean(false))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.tokens.consume()?;
                Ok(Expression::Null)
            }
            TokenKind::Keyword(Keyword::This) => {
                let position = Some(self.tokens.consume()?.position());
                let receiver = Expression::This { position };
                if self.check_symbol(Symbol::Dot)? {
                    self.parse_method_call(receiver)
                } else {
                    Ok(receiver)
                }
            }
            TokenKind::Symbol(Symbol::LParen) => {
                self.tokens.consume()?;
                let inner = self.parse_expression()?;
                self.expect_symbol(Symbol::RParen)?;
                Ok(inner)
            }
            TokenKind::Identifier => {
                let (name, position) = self.expect_identifier()?;
                if self.check_symbol(Symbol::Dot)? {
                    let receiver = Expression::Reference {
                        name,
                        position: Some(position),
                    };
                    self.parse_method_call(receiver)
                } else if self.check_symbol(Symbol::LParen)? {
                    let arguments = self.parse_arguments()?;
                    Ok(Expression::Call {
                        name,
                        arguments,
                        position: Some(position),
                    })
                } else {
                    Ok(Expression::Reference {
                        name,
                        position: Some(position),
                    })
                }
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `.method(args)` after an already-parsed receiver
    fn parse_method_call(&mut self, receiver: Expression) -> CompileResult<Expression> {
        let position = receiver.position();
        self.expect_symbol(Symbol::Dot)?;
        let (method, _) = self.expect_identifier()?;
        let arguments = self.parse_arguments()?;
        Ok(Expression::MethodCall {
            receiver: Box::new(receiver),
            method,
            arguments,
            position,
        })
    }

    fn parse_arguments(&mut self) -> CompileResult<Vec<Expression>> {
        self.expect_symbol(Symbol::LParen)?;
        let mut arguments = Vec::new();
        if !self.check_symbol(Symbol::RParen)? {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.check_symbol(Symbol::Comma)? {
                    break;
                }
                self.tokens.consume()?;
            }
        }
        self.expect_symbol(Symbol::RParen)?;
        Ok(arguments)
    }

    // Helper methods

    fn peek_kind(&mut self) -> CompileResult<Option<TokenKind>> {
        Ok(self.tokens.lookahead()?.map(|t| t.kind))
    }

    fn check_symbol(&mut self, s: Symbol) -> CompileResult<bool> {
        Ok(self.peek_kind()? == Some(TokenKind::Symbol(s)))
    }

    fn check_keyword(&mut self, k: Keyword) -> CompileResult<bool> {
        Ok(self.peek_kind()? == Some(TokenKind::Keyword(k)))
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.peek_kind()? == Some(kind) {
            self.tokens.consume()
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_symbol(&mut self, s: Symbol) -> CompileResult<Token> {
        self.expect(TokenKind::Symbol(s))
    }

    fn expect_keyword(&mut self, k: Keyword) -> CompileResult<Token> {
        self.expect(TokenKind::Keyword(k))
    }

    fn expect_identifier(&mut self) -> CompileResult<(String, SourcePosition)> {
        let token = self.expect(TokenKind::Identifier)?;
        let position = token.position();
        Ok((token.value, position))
    }

    /// Error describing the lookahead token as a mismatch
    fn unexpected(&mut self, expected: &str) -> CompileError {
        let last_position = self.tokens.last_position();
        match self.tokens.lookahead() {
            Ok(Some(token)) => unexpected_token(expected, &token.to_string(), Some(token.position())),
            Ok(None) => unexpected_eof(expected, Some(last_position)),
            Err(error) => error,
        }
    }
}
