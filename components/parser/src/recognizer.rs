//! Recognizer state machines used by the lexer.
//!
//! Each recognizer tracks one lexeme class. The lexer feeds the same byte to
//! every recognizer that is still alive; a recognizer that rejects a byte is
//! dead until the next [`Recognizer::reset`].

use crate::lexer::{Keyword, Symbol, TokenKind};

/// A small state machine recognizing one class of lexeme
pub trait Recognizer {
    /// Offer the next byte. Returns `false` if the byte cannot extend the lexeme.
    fn feed(&mut self, byte: u8) -> bool;

    /// The token kind to close over the consumed bytes, or `None` if what
    /// was consumed is not a complete lexeme.
    fn close(&self) -> Option<TokenKind>;

    /// Number of bytes accepted since the last reset
    fn consumed(&self) -> usize;

    /// Return to the initial state
    fn reset(&mut self);
}

/// Runs of space, tab, carriage return and newline
#[derive(Debug, Default)]
pub struct WhitespaceRecognizer {
    consumed: usize,
}

impl Recognizer for WhitespaceRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        if matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    fn close(&self) -> Option<TokenKind> {
        (self.consumed > 0).then_some(TokenKind::Whitespace)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn reset(&mut self) {
        self.consumed = 0;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum LineCommentState {
    #[default]
    Start,
    Slash,
    Body,
    Terminated,
}

/// `//` up to and including the end of the line
#[derive(Debug, Default)]
pub struct LineCommentRecognizer {
    state: LineCommentState,
    consumed: usize,
}

impl Recognizer for LineCommentRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        let next = match (self.state, byte) {
            (LineCommentState::Start, b'/') => LineCommentState::Slash,
            (LineCommentState::Slash, b'/') => LineCommentState::Body,
            (LineCommentState::Body, b'\n') => LineCommentState::Terminated,
            (LineCommentState::Body, _) => LineCommentState::Body,
            _ => return false,
        };
        self.state = next;
        self.consumed += 1;
        true
    }

    fn close(&self) -> Option<TokenKind> {
        // a comment on the last line may end at end of input
        matches!(
            self.state,
            LineCommentState::Body | LineCommentState::Terminated
        )
        .then_some(TokenKind::Comment)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn reset(&mut self) {
        self.state = LineCommentState::Start;
        self.consumed = 0;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum BlockCommentState {
    #[default]
    Start,
    Slash,
    Body,
    Star,
    Closed,
}

/// `/* ... */`, which also covers `/** ... */` doc comments
#[derive(Debug, Default)]
pub struct BlockCommentRecognizer {
    state: BlockCommentState,
    consumed: usize,
}

impl Recognizer for BlockCommentRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        let next = match (self.state, byte) {
            (BlockCommentState::Start, b'/') => BlockCommentState::Slash,
            (BlockCommentState::Slash, b'*') => BlockCommentState::Body,
            (BlockCommentState::Body, b'*') => BlockCommentState::Star,
            (BlockCommentState::Body, _) => BlockCommentState::Body,
            (BlockCommentState::Star, b'/') => BlockCommentState::Closed,
            (BlockCommentState::Star, b'*') => BlockCommentState::Star,
            (BlockCommentState::Star, _) => BlockCommentState::Body,
            _ => return false,
        };
        self.state = next;
        self.consumed += 1;
        true
    }

    fn close(&self) -> Option<TokenKind> {
        (self.state == BlockCommentState::Closed).then_some(TokenKind::Comment)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn reset(&mut self) {
        self.state = BlockCommentState::Start;
        self.consumed = 0;
    }
}

/// A letter or underscore followed by letters, digits and underscores
#[derive(Debug, Default)]
pub struct IdentifierRecognizer {
    consumed: usize,
}

impl Recognizer for IdentifierRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        let accepted = if self.consumed == 0 {
            byte.is_ascii_alphabetic() || byte == b'_'
        } else {
            byte.is_ascii_alphanumeric() || byte == b'_'
        };
        if accepted {
            self.consumed += 1;
        }
        accepted
    }

    fn close(&self) -> Option<TokenKind> {
        (self.consumed > 0).then_some(TokenKind::Identifier)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn reset(&mut self) {
        self.consumed = 0;
    }
}

/// A run of decimal digits
#[derive(Debug, Default)]
pub struct IntegerRecognizer {
    consumed: usize,
}

impl Recognizer for IntegerRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        if byte.is_ascii_digit() {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    fn close(&self) -> Option<TokenKind> {
        (self.consumed > 0).then_some(TokenKind::IntegerConstant)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn reset(&mut self) {
        self.consumed = 0;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum StringState {
    #[default]
    Start,
    Open,
    Closed,
}

/// A double-quoted string on a single line, without escapes
#[derive(Debug, Default)]
pub struct StringRecognizer {
    state: StringState,
    consumed: usize,
}

impl Recognizer for StringRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        let next = match (self.state, byte) {
            (StringState::Start, b'"') => StringState::Open,
            (StringState::Open, b'"') => StringState::Closed,
            (StringState::Open, b'\n') => return false,
            (StringState::Open, _) => StringState::Open,
            _ => return false,
        };
        self.state = next;
        self.consumed += 1;
        true
    }

    fn close(&self) -> Option<TokenKind> {
        (self.state == StringState::Closed).then_some(TokenKind::StringConstant)
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn reset(&mut self) {
        self.state = StringState::Start;
        self.consumed = 0;
    }
}

/// Exactly one fixed text: a keyword or a symbol
#[derive(Debug)]
pub struct LiteralRecognizer {
    text: &'static [u8],
    kind: TokenKind,
    matched: usize,
}

impl LiteralRecognizer {
    /// Recognize `text` as a token of the given kind
    pub fn new(text: &'static str, kind: TokenKind) -> Self {
        Self {
            text: text.as_bytes(),
            kind,
            matched: 0,
        }
    }

    /// Recognizer for a keyword
    pub fn keyword(keyword: Keyword) -> Self {
        Self::new(keyword.as_str(), TokenKind::Keyword(keyword))
    }

    /// Recognizer for a symbol
    pub fn symbol(symbol: Symbol) -> Self {
        Self::new(symbol.as_str(), TokenKind::Symbol(symbol))
    }
}

impl Recognizer for LiteralRecognizer {
    fn feed(&mut self, byte: u8) -> bool {
        if self.text.get(self.matched) == Some(&byte) {
            self.matched += 1;
            true
        } else {
            false
        }
    }

    fn close(&self) -> Option<TokenKind> {
        (self.matched == self.text.len()).then_some(self.kind)
    }

    fn consumed(&self) -> usize {
        self.matched
    }

    fn reset(&mut self) {
        self.matched = 0;
    }
}

/// The full roster used to tokenize Jack source
pub fn standard_recognizers() -> Vec<Box<dyn Recognizer>> {
    let mut recognizers: Vec<Box<dyn Recognizer>> = vec![
        Box::new(WhitespaceRecognizer::default()),
        Box::new(LineCommentRecognizer::default()),
        Box::new(BlockCommentRecognizer::default()),
        Box::new(IdentifierRecognizer::default()),
        Box::new(IntegerRecognizer::default()),
        Box::new(StringRecognizer::default()),
    ];
    recognizers.extend(
        Keyword::ALL
            .iter()
            .map(|k| Box::new(LiteralRecognizer::keyword(*k)) as Box<dyn Recognizer>),
    );
    recognizers.extend(
        Symbol::ALL
            .iter()
            .map(|s| Box::new(LiteralRecognizer::symbol(*s)) as Box<dyn Recognizer>),
    );
    recognizers
}
