//! Character source over a caller-owned buffered stream.
//!
//! [`CharSource`] decodes UTF-8 one code point at a time straight out of the
//! reader's buffer, so a multi-byte character may straddle a buffer refill.
//! It holds at most one decoded character of lookahead.
//!
//! # Ownership
//!
//! The source borrows the stream mutably for its whole lifetime. Opening and
//! closing the stream is the caller's job; dropping a `CharSource` never
//! closes anything.
//!
//! # Errors
//!
//! Read failures are returned as-is. Malformed UTF-8 is reported as an
//! [`io::Error`] of kind [`io::ErrorKind::InvalidData`], the same kind
//! `std::io::read_to_string` uses. `Interrupted` reads are retried.

use std::io::{self, BufRead};

use crate::Position;

/// Peekable `char` reader with position tracking.
pub struct CharSource<'r, R: BufRead + ?Sized> {
    reader: &'r mut R,
    /// Decoded lookahead. `Some(None)` means end of input was already seen.
    peeked: Option<Option<char>>,
    /// Position of the next character to be consumed.
    pos: Position,
}

impl<'r, R: BufRead + ?Sized> CharSource<'r, R> {
    /// Create a source positioned at the start of `reader`.
    pub fn new(reader: &'r mut R) -> Self {
        Self {
            reader,
            peeked: None,
            pos: Position::START,
        }
    }

    /// Position of the next character to be consumed.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.peeked {
            return Ok(c);
        }
        let c = self.decode_char()?;
        self.peeked = Some(c);
        Ok(c)
    }

    /// Consumes and returns the next character, advancing the position.
    pub fn advance(&mut self) -> io::Result<Option<char>> {
        let c = match self.peeked.take() {
            Some(c) => c,
            None => self.decode_char()?,
        };
        if let Some(c) = c {
            self.pos = self.pos.advance(c);
        } else {
            // Keep reporting EOF without touching the reader again.
            self.peeked = Some(None);
        }
        Ok(c)
    }

    /// Returns `true` once the stream is exhausted.
    pub fn at_end(&mut self) -> io::Result<bool> {
        Ok(self.peek()?.is_none())
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead);
        if width == 0 {
            return Err(invalid_utf8());
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in &mut bytes[1..width] {
            match self.read_byte()? {
                Some(b) if b & 0xC0 == 0x80 => *slot = b,
                _ => return Err(invalid_utf8()),
            }
        }

        // from_utf8 rejects overlong encodings and surrogates.
        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(invalid_utf8)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead + ?Sized> std::fmt::Debug for CharSource<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharSource")
            .field("peeked", &self.peeked)
            .field("pos", &self.pos)
            .finish_non_exhaustive()
    }
}

/// Encoded length implied by a UTF-8 lead byte, or 0 if `b` cannot lead.
#[inline]
fn utf8_width(b: u8) -> usize {
    match b {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

#[cold]
fn invalid_utf8() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    )
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
