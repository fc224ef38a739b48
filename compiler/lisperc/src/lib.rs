//! Lisper command-line driver.
//!
//! Owns everything the lexer deliberately does not: opening source files,
//! installing a log subscriber, and rendering diagnostics for humans.

use std::sync::Once;

pub mod commands;
mod load;
mod render;

pub use load::{open_source, LoadError};
pub use render::render_diagnostic;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
