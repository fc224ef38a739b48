//! Low-level character access for the Lisper lexer.
//!
//! This crate owns the layer beneath tokenization: decoding UTF-8 from a
//! caller-owned buffered stream, one-character lookahead, and running
//! line/column/offset tracking. It knows nothing about tokens.
//!
//! # Layers
//!
//! - [`CharSource`]: borrows a [`std::io::BufRead`] and yields `char`s
//! - [`Position`]: 1-based line/column plus a 0-based code-point offset
//! - [`CharClass`]: the flat character classification the lexer dispatches on

mod char_class;
mod char_source;
mod position;

pub use char_class::{is_delimiter, CharClass};
pub use char_source::CharSource;
pub use position::Position;
