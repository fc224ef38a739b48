//! Command handlers for the `lisper` CLI.
//!
//! Each command comes in two layers: a generic core that lexes any
//! `BufRead` and writes to any `Write` (what the tests drive), and a
//! `*_file` wrapper that opens the file, wires up stdout/stderr, and turns
//! the outcome into an exit code.

use std::io::{self, BufRead, Write};
use std::path::Path;

use lisper_lexer::{LexerConfig, Token, TokenStream};

use crate::{open_source, render_diagnostic};

/// Exit status when lexing succeeded without diagnostics.
pub const EXIT_OK: i32 = 0;
/// Exit status when the file could not be opened or lexing reported errors.
pub const EXIT_FAILURE: i32 = 1;

/// What a lexing pass found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexSummary {
    /// Tokens produced, the terminal one included.
    pub tokens: usize,
    /// Error tokens among them.
    pub errors: usize,
}

impl LexSummary {
    fn record(&mut self, token: &Token) {
        self.tokens += 1;
        if token.is_error() {
            self.errors += 1;
        }
    }

    pub fn exit_code(self) -> i32 {
        if self.errors == 0 {
            EXIT_OK
        } else {
            EXIT_FAILURE
        }
    }
}

/// Write every token of `reader` to `out`, one per line, and every error as
/// a diagnostic to `diagnostics`.
pub fn dump_tokens<R, W, D>(
    path: &str,
    reader: &mut R,
    config: LexerConfig,
    out: &mut W,
    diagnostics: &mut D,
) -> io::Result<LexSummary>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    D: Write + ?Sized,
{
    let mut summary = LexSummary::default();
    for token in TokenStream::with_config(reader, config) {
        summary.record(&token);
        writeln!(out, "{token}")?;
        if let Some(error) = token.error() {
            writeln!(diagnostics, "{}", render_diagnostic(path, error))?;
        }
    }
    Ok(summary)
}

/// Lex `reader` to completion and report only diagnostics.
pub fn check_tokens<R, D>(path: &str, reader: &mut R, diagnostics: &mut D) -> io::Result<LexSummary>
where
    R: BufRead + ?Sized,
    D: Write + ?Sized,
{
    let mut summary = LexSummary::default();
    for token in TokenStream::new(reader) {
        summary.record(&token);
        if let Some(error) = token.error() {
            writeln!(diagnostics, "{}", render_diagnostic(path, error))?;
        }
    }
    Ok(summary)
}

/// `lisper lex <file> [--comments]`
pub fn lex_file(path: &str, config: LexerConfig) -> i32 {
    run_on_file(path, |reader| {
        let stdout = io::stdout();
        let stderr = io::stderr();
        dump_tokens(path, reader, config, &mut stdout.lock(), &mut stderr.lock())
    })
}

/// `lisper check <file>`
pub fn check_file(path: &str) -> i32 {
    run_on_file(path, |reader| {
        let stderr = io::stderr();
        check_tokens(path, reader, &mut stderr.lock())
    })
}

/// Open `path`, hand the reader to `run`, and release the file before
/// returning whatever `run` reported.
fn run_on_file<F>(path: &str, run: F) -> i32
where
    F: FnOnce(&mut dyn BufRead) -> io::Result<LexSummary>,
{
    let mut reader = match open_source(Path::new(path)) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_FAILURE;
        }
    };
    let outcome = run(&mut reader);
    drop(reader);

    match outcome {
        Ok(summary) => {
            tracing::debug!(path, tokens = summary.tokens, errors = summary.errors, "lexed");
            summary.exit_code()
        }
        Err(e) => {
            eprintln!("error: failed to write output: {e}");
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
