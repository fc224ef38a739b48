//! Character classification for lexer dispatch.
//!
//! The lexer decides a token's class from the first character alone, so the
//! whole decision is one flat match over [`CharClass`].

/// Lexical class of a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Space, tab, `\n` or `\r`.
    Whitespace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `'`
    Quote,
    /// `;`
    Semicolon,
    /// `"`
    DoubleQuote,
    /// ASCII `0`..=`9`.
    Digit,
    /// `+` or `-`. Starts a number only when a digit follows.
    Sign,
    /// Anything else. Starts a symbol.
    Other,
}

impl CharClass {
    /// Classify `c`.
    #[inline]
    pub const fn of(c: char) -> Self {
        match c {
            ' ' | '\t' | '\n' | '\r' => Self::Whitespace,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '\'' => Self::Quote,
            ';' => Self::Semicolon,
            '"' => Self::DoubleQuote,
            '0'..='9' => Self::Digit,
            '+' | '-' => Self::Sign,
            _ => Self::Other,
        }
    }

    /// Returns `true` if this class ends a symbol or number run.
    ///
    /// `'` is not a delimiter: `a'b` is a single symbol.
    #[inline]
    pub const fn is_delimiter(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::LeftParen
                | Self::RightParen
                | Self::DoubleQuote
                | Self::Semicolon
        )
    }
}

/// Returns `true` if `c` ends a symbol or number run. End of input (`None`)
/// is a delimiter.
#[inline]
pub fn is_delimiter(c: Option<char>) -> bool {
    match c {
        Some(c) => CharClass::of(c).is_delimiter(),
        None => true,
    }
}
