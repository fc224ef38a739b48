//! Token model.

use std::fmt;

use lisper_lexer_core::Position;

use crate::LexError;

/// What a token is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    /// `'`, reader shorthand for quoting the following form.
    Quote,
    Symbol,
    Integer,
    Float,
    /// Lexeme is the decoded content, without the surrounding quotes.
    StringLiteral,
    /// Only produced when [`LexerConfig::emit_comments`](crate::LexerConfig) is set.
    Comment,
    /// Terminal token. Repeated forever once reached.
    EndOfInput,
    /// A lexical error. Scanning continues after the offending lexeme unless
    /// the error is an I/O failure.
    Error(LexError),
}

impl TokenKind {
    /// Short human-readable name, used in token dumps and traces.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
            Self::Quote => "Quote",
            Self::Symbol => "Symbol",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::StringLiteral => "String",
            Self::Comment => "Comment",
            Self::EndOfInput => "EndOfInput",
            Self::Error(_) => "Error",
        }
    }
}

/// A classified, positioned fragment of source text.
///
/// `start` is the position of the first character and `end` the position
/// just past the last one, so `end.offset - start.offset` is the number of
/// characters the token covers in the source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub start: Position,
    pub end: Position,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            start,
            end,
        }
    }

    /// The zero-width terminal token at `pos`.
    pub fn end_of_input(pos: Position) -> Self {
        Self::new(TokenKind::EndOfInput, String::new(), pos, pos)
    }

    /// The error carried by this token, if it is an error token.
    pub fn error(&self) -> Option<&LexError> {
        match &self.kind {
            TokenKind::Error(err) => Some(err),
            _ => None,
        }
    }

    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::EndOfInput => write!(f, "{}  {}", self.start, self.kind.display_name()),
            TokenKind::Error(err) => write!(f, "{}  Error  {}", self.start, err.message),
            kind => write!(f, "{}  {}  {:?}", self.start, kind.display_name(), self.lexeme),
        }
    }
}
