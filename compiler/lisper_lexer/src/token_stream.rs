//! Pull-based token stream.
//!
//! [`TokenStream`] is what a parser consumes. It never fails: every call to
//! [`next_token`](TokenStream::next_token) returns a [`Token`]. Once the
//! input is exhausted it returns `EndOfInput` forever. If the reader fails,
//! the stream is poisoned and returns the same I/O error token forever. That
//! token spans the characters of the interrupted token read before the
//! failure. There is no rewinding; a consumer that needs more than one token of
//! lookahead buffers tokens itself.

use std::io::BufRead;

use lisper_lexer_core::Position;
use tracing::{debug, trace};

use crate::{LexError, Lexer, LexerConfig, Token, TokenKind};

/// Lifecycle of a stream.
#[derive(Clone, Debug)]
enum Phase {
    Active,
    /// Input exhausted at the given position.
    Done(Position),
    /// Reader failed. Holds the error token to repeat.
    Failed(Token),
}

/// Lazy sequence of tokens over a borrowed reader.
pub struct TokenStream<'r, R: BufRead + ?Sized> {
    lexer: Lexer<'r, R>,
    phase: Phase,
    /// Set once the [`Iterator`] impl has yielded its terminal token.
    fused: bool,
}

impl<'r, R: BufRead + ?Sized> TokenStream<'r, R> {
    /// Create a stream over `reader` with the default configuration.
    pub fn new(reader: &'r mut R) -> Self {
        Self::with_config(reader, LexerConfig::default())
    }

    /// Create a stream over `reader` with `config`.
    pub fn with_config(reader: &'r mut R, config: LexerConfig) -> Self {
        Self {
            lexer: Lexer::with_config(reader, config),
            phase: Phase::Active,
            fused: false,
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        match &self.phase {
            Phase::Active => {}
            Phase::Done(pos) => return Token::end_of_input(*pos),
            Phase::Failed(token) => return token.clone(),
        }

        match self.lexer.scan_token() {
            Ok(token) => {
                trace!(
                    kind = token.kind.display_name(),
                    line = token.start.line,
                    column = token.start.column,
                    lexeme = %token.lexeme,
                    "token"
                );
                if token.is_end_of_input() {
                    debug!(at = %token.start, "end of input");
                    self.phase = Phase::Done(token.start);
                }
                token
            }
            Err(err) => {
                debug!(
                    at = %err.position,
                    error = %err.source,
                    "reader failed, poisoning token stream"
                );
                let error = LexError::io_failure(err.position, &err.source);
                let kind = TokenKind::Error(error);
                let token = Token::new(kind, err.partial, err.start, err.position);
                self.phase = Phase::Failed(token.clone());
                token
            }
        }
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        self.lexer.position()
    }

    /// Returns `true` once the stream has reached `EndOfInput` or failed.
    pub fn is_finished(&self) -> bool {
        !matches!(self.phase, Phase::Active)
    }
}

/// Yields every token up to and including the terminal one (`EndOfInput` or
/// the I/O error), then `None`.
impl<R: BufRead + ?Sized> Iterator for TokenStream<'_, R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.fused {
            return None;
        }
        let token = self.next_token();
        if self.is_finished() {
            self.fused = true;
        }
        Some(token)
    }
}

impl<R: BufRead + ?Sized> std::iter::FusedIterator for TokenStream<'_, R> {}

impl<R: BufRead + ?Sized> std::fmt::Debug for TokenStream<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStream")
            .field("lexer", &self.lexer)
            .field("phase", &self.phase)
            .field("fused", &self.fused)
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
