//! Numeric literal shape checking.
//!
//! A number-led run is consumed up to the next delimiter and checked against
//!
//! ```text
//! [+-]? digit+ ( '.' digit+ )? ( [eE] [+-]? digit+ )?
//! ```
//!
//! one character at a time. The check is a pure transition function, so the
//! lexer threads a [`NumberScan`] through its scan state instead of
//! re-parsing the lexeme afterwards.

/// Position within the numeric grammar after the characters seen so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumberShape {
    Start,
    Sign,
    Int,
    Dot,
    Frac,
    Exp,
    ExpSign,
    ExpDigits,
    Invalid,
}

impl NumberShape {
    fn step(self, c: char) -> Self {
        match (self, c) {
            (Self::Start, '+' | '-') => Self::Sign,
            (Self::Start | Self::Sign | Self::Int, '0'..='9') => Self::Int,
            (Self::Int, '.') => Self::Dot,
            (Self::Dot | Self::Frac, '0'..='9') => Self::Frac,
            (Self::Int | Self::Frac, 'e' | 'E') => Self::Exp,
            (Self::Exp, '+' | '-') => Self::ExpSign,
            (Self::Exp | Self::ExpSign | Self::ExpDigits, '0'..='9') => Self::ExpDigits,
            _ => Self::Invalid,
        }
    }
}

/// Classification of a well-formed numeric lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Integer,
    Float,
}

/// Running check of a numeric lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NumberScan {
    shape: NumberShape,
    /// First character that moved the shape to `Invalid`.
    offending: Option<char>,
}

impl NumberScan {
    pub(crate) const START: NumberScan = NumberScan {
        shape: NumberShape::Start,
        offending: None,
    };

    /// Feed the next character of the lexeme.
    #[must_use]
    pub(crate) fn feed(self, c: char) -> Self {
        if self.shape == NumberShape::Invalid {
            return self;
        }
        match self.shape.step(c) {
            NumberShape::Invalid => Self {
                shape: NumberShape::Invalid,
                offending: Some(c),
            },
            shape => Self { shape, ..self },
        }
    }

    /// Classify the lexeme fed so far.
    ///
    /// On failure returns the offending character, or `None` if the lexeme
    /// stopped short of an accepting state.
    pub(crate) fn finish(self) -> Result<NumberKind, Option<char>> {
        match self.shape {
            NumberShape::Int => Ok(NumberKind::Integer),
            NumberShape::Frac | NumberShape::ExpDigits => Ok(NumberKind::Float),
            NumberShape::Invalid => Err(self.offending),
            _ => Err(None),
        }
    }
}

#[cfg(test)]
pub(crate) fn classify(lexeme: &str) -> Result<NumberKind, Option<char>> {
    lexeme.chars().fold(NumberScan::START, NumberScan::feed).finish()
}
