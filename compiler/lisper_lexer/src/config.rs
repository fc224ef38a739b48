//! Lexer configuration.

/// Knobs for a [`Lexer`](crate::Lexer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LexerConfig {
    /// Emit `;` comments as [`TokenKind::Comment`](crate::TokenKind::Comment)
    /// tokens instead of discarding them. Off by default.
    pub emit_comments: bool,
}

impl LexerConfig {
    /// Return a copy with comment emission set to `emit`.
    #[must_use]
    pub fn with_comments(mut self, emit: bool) -> Self {
        self.emit_comments = emit;
        self
    }
}
