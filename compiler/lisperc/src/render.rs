//! Diagnostic rendering.

use std::fmt::Write as _;

use lisper_lexer::{LexError, LexErrorKind};

/// Render `error` found in `path` as a one-line diagnostic, followed by a
/// help line when the error has one.
///
/// ```text
/// main.lisper:3:7: error: invalid escape sequence `\q`
///   = help: valid escapes are: \n, \t, \", \\
/// ```
pub fn render_diagnostic(path: &str, error: &LexError) -> String {
    let mut out = format!(
        "{path}:{}:{}: error: {}",
        error.position.line, error.position.column, error.message
    );
    if let Some(help) = error.help() {
        let _ = write!(out, "\n  = help: {help}");
    }
    if let (LexErrorKind::MalformedNumber, Some(c)) = (error.kind, error.offending_char) {
        let _ = write!(out, "\n  = note: unexpected `{}`", c.escape_debug());
    }
    out
}
