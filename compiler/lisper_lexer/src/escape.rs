//! String escape table.
//!
//! Lisper strings accept exactly four escapes: `\n` `\t` `\"` `\\`.

/// Resolve the character following a backslash inside a string literal.
///
/// Returns `None` for anything outside the table; the caller reports
/// `InvalidEscape`.
#[inline]
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}
