//! Source positions.

use std::fmt;

/// A location in the source text.
///
/// `line` and `column` are 1-based and count code points, `offset` is the
/// 0-based number of code points consumed before this position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    /// The position of the first character of any source.
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };

    /// Create a position from its parts.
    pub const fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The position immediately after consuming `c` at `self`.
    ///
    /// Only `\n` starts a new line. A lone `\r` occupies a column like any
    /// other character. Line and column saturate at `u32::MAX`.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line.saturating_add(1),
                column: 1,
                offset: self.offset + 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column.saturating_add(1),
                offset: self.offset + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
