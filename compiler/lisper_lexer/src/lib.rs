//! Lexer for Lisper.
//!
//! Turns a borrowed byte stream into [`Token`]s, one per call, ending with a
//! sticky [`TokenKind::EndOfInput`]. Malformed input never aborts the stream:
//! it comes back as a [`TokenKind::Error`] token and scanning resumes after
//! the offending lexeme. A failing reader is the one exception and poisons
//! the stream.
//!
//! ```
//! use lisper_lexer::{tokenize, TokenKind};
//!
//! let kinds: Vec<_> = tokenize("(+ 1 2.5)").into_iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::LeftParen,
//!         TokenKind::Symbol,
//!         TokenKind::Integer,
//!         TokenKind::Float,
//!         TokenKind::RightParen,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! ```

mod config;
mod escape;
mod lex_error;
mod lexer;
mod number;
mod token;
mod token_stream;

pub use config::LexerConfig;
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{Lexer, ScanError};
pub use lisper_lexer_core::{CharSource, Position};
pub use token::{Token, TokenKind};
pub use token_stream::TokenStream;

/// Tokenize an in-memory source with the default configuration.
///
/// The returned vector always ends with a single `EndOfInput` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_with(source, LexerConfig::default())
}

/// Tokenize an in-memory source with `config`.
pub fn tokenize_with(source: &str, config: LexerConfig) -> Vec<Token> {
    let mut bytes = source.as_bytes();
    TokenStream::with_config(&mut bytes, config).collect()
}
