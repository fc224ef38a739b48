//! Lexer error types.
//!
//! Errors follow a WHERE+WHAT shape:
//! - WHERE: `position` of the offending character (or of the construct's
//!   first character, for unterminated strings and malformed numbers)
//! - WHAT: `kind` plus a rendered `message`
//!
//! `Display` renders `line:column: message`, enough for a diagnostic without
//! re-scanning the source. [`LexError::help`] supplies the HOW.

use std::io;

use lisper_lexer_core::Position;

/// A lexical error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{position}: {message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub position: Position,
    pub offending_char: Option<char>,
}

/// What kind of lexer error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// The underlying stream failed to produce a character. Terminal.
    IoFailure { kind: io::ErrorKind },
    /// End of input inside a string literal.
    UnterminatedString,
    /// Backslash followed by a character outside the escape table.
    InvalidEscape,
    /// A number-led run that does not match the numeric grammar.
    MalformedNumber,
}

impl LexError {
    /// Create an I/O failure error.
    #[cold]
    pub fn io_failure(position: Position, err: &io::Error) -> Self {
        Self {
            kind: LexErrorKind::IoFailure { kind: err.kind() },
            message: format!("failed to read source: {err}"),
            position,
            offending_char: None,
        }
    }

    /// Create an unterminated string error at the opening quote.
    #[cold]
    pub fn unterminated_string(position: Position) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedString,
            message: "unterminated string literal".to_string(),
            position,
            offending_char: Some('"'),
        }
    }

    /// Create an invalid escape error at the backslash.
    #[cold]
    pub fn invalid_escape(position: Position, escape_char: char) -> Self {
        Self {
            kind: LexErrorKind::InvalidEscape,
            message: format!("invalid escape sequence `\\{}`", escape_char.escape_debug()),
            position,
            offending_char: Some(escape_char),
        }
    }

    /// Create a malformed number error covering the whole `lexeme`.
    ///
    /// `offending_char` is the first character that broke the grammar, or
    /// `None` when the lexeme simply ended too early (`1.`, `2e`).
    #[cold]
    pub fn malformed_number(position: Position, lexeme: &str, offending_char: Option<char>) -> Self {
        Self {
            kind: LexErrorKind::MalformedNumber,
            message: format!("malformed number `{lexeme}`"),
            position,
            offending_char,
        }
    }

    /// Returns `true` if the stream cannot continue after this error.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, LexErrorKind::IoFailure { .. })
    }

    /// A short hint on how to fix the error, if there is one.
    pub fn help(&self) -> Option<&'static str> {
        match self.kind {
            LexErrorKind::IoFailure { .. } => None,
            LexErrorKind::UnterminatedString => Some("add a closing `\"`"),
            LexErrorKind::InvalidEscape => Some(r#"valid escapes are: \n, \t, \", \\"#),
            LexErrorKind::MalformedNumber => {
                Some("numbers look like `42`, `-7`, `2.5` or `1.5e-3`")
            }
        }
    }
}
