//! Jack Lexer - tokenizes source code into tokens
//!
//! The lexer runs a roster of [`Recognizer`]s over the input in rounds. Every
//! live recognizer sees each byte; once all of them have rejected a byte, the
//! ones that died on that byte compete to close a token. The longest lexeme
//! wins and ties go to the higher [`TokenKind::priority`].

use std::fmt;
use std::iter::FusedIterator;

use core_types::{CompileError, CompileResult, SourcePosition, SourceSpan};

use crate::error::lexical_error;
use crate::recognizer::{standard_recognizers, Recognizer};

/// Bytes of trailing context quoted in a lexical error
const ERROR_CONTEXT_BYTES: usize = 10;

/// Jack keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// class keyword
    Class,
    /// constructor keyword
    Constructor,
    /// function keyword
    Function,
    /// method keyword
    Method,
    /// field keyword
    Field,
    /// static keyword
    Static,
    /// var keyword
    Var,
    /// int keyword
    Int,
    /// char keyword
    Char,
    /// boolean keyword
    Boolean,
    /// void keyword
    Void,
    /// true keyword
    True,
    /// false keyword
    False,
    /// null keyword
    Null,
    /// this keyword
    This,
    /// let keyword
    Let,
    /// do keyword
    Do,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// return keyword
    Return,
}

impl Keyword {
    /// Every keyword, in declaration order
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    /// Source text of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

/// Jack symbols (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening bracket
    LBracket,
    /// Closing bracket
    RBracket,
    /// Dot
    Dot,
    /// Comma
    Comma,
    /// Semicolon
    Semicolon,
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Star
    Star,
    /// Slash
    Slash,
    /// Ampersand
    And,
    /// Pipe
    Or,
    /// Less than
    Lt,
    /// Greater than
    Gt,
    /// Equals
    Eq,
    /// Tilde
    Tilde,
}

impl Symbol {
    /// Every symbol, in declaration order
    pub const ALL: [Symbol; 19] = [
        Symbol::LBrace,
        Symbol::RBrace,
        Symbol::LParen,
        Symbol::RParen,
        Symbol::LBracket,
        Symbol::RBracket,
        Symbol::Dot,
        Symbol::Comma,
        Symbol::Semicolon,
        Symbol::Plus,
        Symbol::Minus,
        Symbol::Star,
        Symbol::Slash,
        Symbol::And,
        Symbol::Or,
        Symbol::Lt,
        Symbol::Gt,
        Symbol::Eq,
        Symbol::Tilde,
    ];

    /// Source text of the symbol
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::Dot => ".",
            Symbol::Comma => ",",
            Symbol::Semicolon => ";",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::And => "&",
            Symbol::Or => "|",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Eq => "=",
            Symbol::Tilde => "~",
        }
    }
}

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier
    Identifier,
    /// Decimal integer literal
    IntegerConstant,
    /// Double-quoted string literal
    StringConstant,
    /// Reserved word
    Keyword(Keyword),
    /// Operator or delimiter
    Symbol(Symbol),
    /// Whitespace run
    Whitespace,
    /// Line or block comment
    Comment,
}

impl TokenKind {
    /// Tie-break rank when two recognizers close lexemes of the same length.
    /// Higher wins.
    pub fn priority(self) -> u8 {
        match self {
            TokenKind::Keyword(_) => 5,
            TokenKind::Symbol(_) => 4,
            TokenKind::IntegerConstant | TokenKind::StringConstant => 3,
            TokenKind::Identifier => 2,
            TokenKind::Comment => 1,
            TokenKind::Whitespace => 0,
        }
    }

    /// Whitespace and comments carry no meaning for the parser
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::IntegerConstant => write!(f, "integer constant"),
            TokenKind::StringConstant => write!(f, "string constant"),
            TokenKind::Keyword(k) => write!(f, "'{}'", k.as_str()),
            TokenKind::Symbol(s) => write!(f, "'{}'", s.as_str()),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Comment => write!(f, "comment"),
        }
    }
}

/// A token with its kind, text and location.
///
/// `value` is the lexeme text, except for string constants where it is the
/// contents between the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category
    pub kind: TokenKind,
    /// Token text
    pub value: String,
    /// Source location of the lexeme
    pub span: SourceSpan,
}

impl Token {
    /// Position of the first byte of the token
    pub fn position(&self) -> SourcePosition {
        self.span.start
    }

    /// Check if this is whitespace or a comment
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::IntegerConstant => {
                write!(f, "{} '{}'", self.kind, self.value)
            }
            TokenKind::StringConstant => write!(f, "{} \"{}\"", self.kind, self.value),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Jack lexer
///
/// Yields every token, trivia included, and stops after the first lexical
/// error.
pub struct Lexer<'a> {
    source: &'a [u8],
    recognizers: Vec<Box<dyn Recognizer>>,
    alive: Vec<bool>,
    offset: usize,
    line: u32,
    column: u32,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over the standard Jack vocabulary
    pub fn new(source: &'a str) -> Self {
        Self::with_recognizers(source, standard_recognizers())
    }

    /// Create a lexer driven by a custom recognizer roster
    pub fn with_recognizers(source: &'a str, recognizers: Vec<Box<dyn Recognizer>>) -> Self {
        let alive = vec![false; recognizers.len()];
        Self {
            source: source.as_bytes(),
            recognizers,
            alive,
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    fn current_position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.offset)
    }

    /// Run one round starting at the current offset
    fn scan_token(&mut self) -> CompileResult<Token> {
        let start = self.offset;
        for recognizer in &mut self.recognizers {
            recognizer.reset();
        }
        self.alive.iter_mut().for_each(|a| *a = true);

        let mut cursor = start;
        let died = loop {
            // end of input rejects every recognizer
            let byte = self.source.get(cursor).copied();
            let mut died_now = Vec::new();
            let mut any_alive = false;
            for (i, recognizer) in self.recognizers.iter_mut().enumerate() {
                if !self.alive[i] {
                    continue;
                }
                let accepted = byte.map(|b| recognizer.feed(b)).unwrap_or(false);
                if accepted {
                    any_alive = true;
                } else {
                    self.alive[i] = false;
                    died_now.push(i);
                }
            }
            if !any_alive {
                break died_now;
            }
            cursor += 1;
        };

        let mut best: Option<(usize, TokenKind)> = None;
        for i in died {
            let recognizer = &self.recognizers[i];
            let len = recognizer.consumed();
            if len == 0 {
                continue;
            }
            if let Some(kind) = recognizer.close() {
                let better = match best {
                    None => true,
                    Some((best_len, best_kind)) => {
                        len > best_len || (len == best_len && kind.priority() > best_kind.priority())
                    }
                };
                if better {
                    best = Some((len, kind));
                }
            }
        }

        match best {
            Some((len, kind)) => Ok(self.commit(kind, len)),
            None => Err(self.round_error(start, cursor)),
        }
    }

    fn commit(&mut self, kind: TokenKind, len: usize) -> Token {
        let start_position = self.current_position();
        let lexeme = &self.source[self.offset..self.offset + len];
        let mut end_position = start_position;
        for &byte in lexeme {
            end_position = self.current_position();
            self.offset += 1;
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        let text = match kind {
            TokenKind::StringConstant => &lexeme[1..lexeme.len() - 1],
            _ => lexeme,
        };

        Token {
            kind,
            value: String::from_utf8_lossy(text).into_owned(),
            span: SourceSpan::new(start_position, end_position),
        }
    }

    fn round_error(&self, start: usize, cursor: usize) -> CompileError {
        // the fragment read this round, the byte that ended it, then a little
        // more context, never past the end of the line
        let mut end = cursor;
        let limit = (cursor + 1 + ERROR_CONTEXT_BYTES).min(self.source.len());
        while end < limit && self.source[end] != b'\n' {
            end += 1;
        }
        let fragment = String::from_utf8_lossy(&self.source[start..end]);
        lexical_error(fragment.trim_end(), self.current_position())
    }
}

impl Iterator for Lexer<'_> {
    type Item = CompileResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.offset >= self.source.len() {
            return None;
        }
        let result = self.scan_token();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}
