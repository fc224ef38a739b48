//! The Lisper lexer state machine.
//!
//! # Design
//!
//! Scanning one token is a loop over a single [`ScanState`] value. Each
//! iteration peeks one character and asks the pure transition function
//! [`ScanState::step`] what to do with it: skip it, consume it and move to a
//! new state, or finish the token (with or without consuming it). The driver
//! in [`Lexer::scan_token`] performs the I/O and buffers the lexeme.
//!
//! The token class is fixed by the first character. Only a digit, or `+`/`-`
//! immediately followed by a digit, starts a number; everything else that is
//! not structural starts a symbol. One character of lookahead is enough for
//! every decision.

use std::io::{self, BufRead};

use lisper_lexer_core::{is_delimiter, CharClass, CharSource, Position};

use crate::escape::resolve_escape;
use crate::number::{NumberKind, NumberScan};
use crate::{LexError, LexerConfig, Token, TokenKind};

/// An invalid escape seen inside a string that is still being scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BadEscape {
    /// Position of the backslash.
    position: Position,
    escape: char,
}

/// Where the scanner is within the current token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    /// Between tokens.
    Start,
    /// Consumed a `+` or `-`; the next character decides number vs symbol.
    SignLead(char),
    InSymbol,
    InNumber(NumberScan),
    /// Inside `"..."`. Remembers the first invalid escape, if any.
    InString(Option<BadEscape>),
    /// Just consumed a backslash inside a string.
    InEscape {
        pending: Option<BadEscape>,
        backslash: Position,
    },
    InComment,
}

/// What to push onto the decoded lexeme for a consumed character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cook {
    Keep,
    Push(char),
    Drop,
}

/// How a token ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    LeftParen,
    RightParen,
    Quote,
    Symbol,
    Number(Result<NumberKind, Option<char>>),
    StringLiteral,
    InvalidEscape(BadEscape),
    UnterminatedString,
    Comment,
    EndOfInput,
}

/// Result of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Consume the character outside of any token (whitespace).
    Skip,
    /// Consume the character and continue in the given state.
    Continue(ScanState, Cook),
    /// Consume the character and finish the token.
    Finish(Cook, Outcome),
    /// Finish the token. The character belongs to the next one.
    Stop(Outcome),
}

impl ScanState {
    /// Decide what to do with the lookahead `c` found at `pos`.
    fn step(self, c: Option<char>, pos: Position) -> Step {
        match self {
            Self::Start => Self::start(c),
            Self::SignLead(sign) => match c {
                Some(d @ '0'..='9') => {
                    let scan = NumberScan::START.feed(sign).feed(d);
                    Step::Continue(Self::InNumber(scan), Cook::Keep)
                }
                Some(c) if !is_delimiter(Some(c)) => Step::Continue(Self::InSymbol, Cook::Keep),
                _ => Step::Stop(Outcome::Symbol),
            },
            Self::InSymbol => match c {
                Some(c) if !is_delimiter(Some(c)) => Step::Continue(Self::InSymbol, Cook::Keep),
                _ => Step::Stop(Outcome::Symbol),
            },
            Self::InNumber(scan) => match c {
                Some(c) if !is_delimiter(Some(c)) => {
                    Step::Continue(Self::InNumber(scan.feed(c)), Cook::Keep)
                }
                _ => Step::Stop(Outcome::Number(scan.finish())),
            },
            Self::InString(pending) => match c {
                None => Step::Stop(Outcome::UnterminatedString),
                Some('"') => Step::Finish(
                    Cook::Drop,
                    pending.map_or(Outcome::StringLiteral, Outcome::InvalidEscape),
                ),
                Some('\\') => Step::Continue(
                    Self::InEscape {
                        pending,
                        backslash: pos,
                    },
                    Cook::Drop,
                ),
                Some(_) => Step::Continue(Self::InString(pending), Cook::Keep),
            },
            Self::InEscape { pending, backslash } => match c {
                None => Step::Stop(Outcome::UnterminatedString),
                Some(c) => match resolve_escape(c) {
                    Some(decoded) => Step::Continue(Self::InString(pending), Cook::Push(decoded)),
                    None => {
                        let pending = pending.or(Some(BadEscape {
                            position: backslash,
                            escape: c,
                        }));
                        Step::Continue(Self::InString(pending), Cook::Keep)
                    }
                },
            },
            Self::InComment => match c {
                None | Some('\n') => Step::Stop(Outcome::Comment),
                Some(_) => Step::Continue(Self::InComment, Cook::Keep),
            },
        }
    }

    fn start(c: Option<char>) -> Step {
        let Some(c) = c else {
            return Step::Stop(Outcome::EndOfInput);
        };
        match CharClass::of(c) {
            CharClass::Whitespace => Step::Skip,
            CharClass::LeftParen => Step::Finish(Cook::Keep, Outcome::LeftParen),
            CharClass::RightParen => Step::Finish(Cook::Keep, Outcome::RightParen),
            CharClass::Quote => Step::Finish(Cook::Keep, Outcome::Quote),
            CharClass::Semicolon => Step::Continue(Self::InComment, Cook::Keep),
            CharClass::DoubleQuote => Step::Continue(Self::InString(None), Cook::Drop),
            CharClass::Digit => {
                Step::Continue(Self::InNumber(NumberScan::START.feed(c)), Cook::Keep)
            }
            CharClass::Sign => Step::Continue(Self::SignLead(c), Cook::Keep),
            CharClass::Other => Step::Continue(Self::InSymbol, Cook::Keep),
        }
    }
}

/// A read failure in the middle of [`Lexer::scan_token`].
#[derive(Debug, thiserror::Error)]
#[error("{position}: failed to read source: {source}")]
pub struct ScanError {
    pub source: io::Error,
    /// Where the interrupted token started.
    pub start: Position,
    /// Where the read failed.
    pub position: Position,
    /// Characters of the interrupted token consumed before the failure.
    pub partial: String,
}

/// Token scanner over a [`CharSource`].
///
/// `scan_token` surfaces reader failures as `Err`; structural problems come
/// back as error tokens. [`TokenStream`](crate::TokenStream) wraps this with
/// the sticky end-of-input and poisoning rules, and is what consumers
/// normally use.
pub struct Lexer<'r, R: BufRead + ?Sized> {
    source: CharSource<'r, R>,
    config: LexerConfig,
}

impl<'r, R: BufRead + ?Sized> Lexer<'r, R> {
    /// Create a lexer over `reader` with the default configuration.
    pub fn new(reader: &'r mut R) -> Self {
        Self::with_config(reader, LexerConfig::default())
    }

    /// Create a lexer over `reader` with `config`.
    pub fn with_config(reader: &'r mut R, config: LexerConfig) -> Self {
        Self {
            source: CharSource::new(reader),
            config,
        }
    }

    /// Position of the next unconsumed character.
    #[inline]
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// Scan the next token.
    ///
    /// At end of input this returns a zero-width `EndOfInput` token, and
    /// keeps doing so on every later call. A read failure part-way through
    /// a token comes back as a [`ScanError`] carrying the text scanned so far.
    pub fn scan_token(&mut self) -> Result<Token, ScanError> {
        let mut start = self.source.position();
        let mut raw = String::new();
        let mut cooked = String::new();
        match self.scan(&mut start, &mut raw, &mut cooked) {
            Ok(token) => Ok(token),
            Err(source) => Err(ScanError {
                source,
                start,
                position: self.source.position(),
                partial: raw,
            }),
        }
    }

    fn scan(
        &mut self,
        start: &mut Position,
        raw: &mut String,
        cooked: &mut String,
    ) -> io::Result<Token> {
        let mut state = ScanState::Start;

        loop {
            let pos = self.source.position();
            let c = self.source.peek()?;
            let outcome = match state.step(c, pos) {
                Step::Skip => {
                    self.source.advance()?;
                    *start = self.source.position();
                    continue;
                }
                Step::Continue(next, cook) => {
                    self.consume(cook, raw, cooked)?;
                    state = next;
                    continue;
                }
                Step::Finish(cook, outcome) => {
                    self.consume(cook, raw, cooked)?;
                    outcome
                }
                Step::Stop(outcome) => outcome,
            };

            if outcome == Outcome::Comment && !self.config.emit_comments {
                state = ScanState::Start;
                *start = self.source.position();
                raw.clear();
                cooked.clear();
                continue;
            }

            let (raw, cooked) = (std::mem::take(raw), std::mem::take(cooked));
            return Ok(self.build(outcome, *start, raw, cooked));
        }
    }

    fn consume(&mut self, cook: Cook, raw: &mut String, cooked: &mut String) -> io::Result<()> {
        if let Some(c) = self.source.advance()? {
            raw.push(c);
            match cook {
                Cook::Keep => cooked.push(c),
                Cook::Push(decoded) => cooked.push(decoded),
                Cook::Drop => {}
            }
        }
        Ok(())
    }

    fn build(&self, outcome: Outcome, start: Position, raw: String, cooked: String) -> Token {
        let end = self.source.position();
        let kind = match outcome {
            Outcome::LeftParen => TokenKind::LeftParen,
            Outcome::RightParen => TokenKind::RightParen,
            Outcome::Quote => TokenKind::Quote,
            Outcome::Symbol => TokenKind::Symbol,
            Outcome::Comment => TokenKind::Comment,
            Outcome::EndOfInput => TokenKind::EndOfInput,
            Outcome::Number(Ok(NumberKind::Integer)) => TokenKind::Integer,
            Outcome::Number(Ok(NumberKind::Float)) => TokenKind::Float,
            Outcome::Number(Err(offending)) => {
                TokenKind::Error(LexError::malformed_number(start, &raw, offending))
            }
            Outcome::StringLiteral => TokenKind::StringLiteral,
            Outcome::InvalidEscape(bad) => {
                TokenKind::Error(LexError::invalid_escape(bad.position, bad.escape))
            }
            Outcome::UnterminatedString => TokenKind::Error(LexError::unterminated_string(start)),
        };
        // Strings carry their decoded content; everything else, errors
        // included, carries the text exactly as scanned.
        let lexeme = if kind == TokenKind::StringLiteral {
            cooked
        } else {
            raw
        };
        Token::new(kind, lexeme, start, end)
    }
}

impl<R: BufRead + ?Sized> std::fmt::Debug for Lexer<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("source", &self.source)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
