//! Token buffer between the lexer and the parser
//!
//! Drops whitespace and comments and holds one token of lookahead.

use core_types::{CompileError, CompileResult, SourcePosition};

use crate::error::unexpected_eof;
use crate::lexer::{Lexer, Token};

/// Significant tokens of a source file, pulled from the lexer on demand
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
    error: Option<CompileError>,
    last_position: SourcePosition,
}

impl<'a> TokenStream<'a> {
    /// Create a token stream over Jack source
    pub fn new(source: &'a str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    /// Wrap an existing lexer
    pub fn from_lexer(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            peeked: None,
            error: None,
            last_position: SourcePosition::start(),
        }
    }

    fn fill(&mut self) -> CompileResult<()> {
        if self.peeked.is_some() {
            return Ok(());
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        for item in self.lexer.by_ref() {
            match item {
                Ok(token) if token.is_trivia() => continue,
                Ok(token) => {
                    self.peeked = Some(token);
                    break;
                }
                Err(error) => {
                    self.error = Some(error.clone());
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    /// The next significant token, or `None` at end of input
    pub fn lookahead(&mut self) -> CompileResult<Option<&Token>> {
        self.fill()?;
        Ok(self.peeked.as_ref())
    }

    /// The next significant token without consuming it.
    ///
    /// Calling this repeatedly returns the same token.
    pub fn peek(&mut self) -> CompileResult<&Token> {
        let position = self.last_position;
        self.fill()?;
        self.peeked
            .as_ref()
            .ok_or_else(|| unexpected_eof("a token", Some(position)))
    }

    /// Take the next significant token
    pub fn consume(&mut self) -> CompileResult<Token> {
        self.fill()?;
        match self.peeked.take() {
            Some(token) => {
                self.last_position = token.span.end;
                Ok(token)
            }
            None => Err(unexpected_eof("a token", Some(self.last_position))),
        }
    }

    /// Check if no significant tokens remain
    pub fn is_exhausted(&mut self) -> CompileResult<bool> {
        Ok(self.lookahead()?.is_none())
    }

    /// Position of the last byte of the most recently consumed token
    pub fn last_position(&self) -> SourcePosition {
        self.last_position
    }
}
