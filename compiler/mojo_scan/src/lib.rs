//! `mojo-scan`: dump the token stream and state snapshots of the Mojo
//! external scanner for a source file.
//!
//! The binary is a thin wrapper; argument parsing and rendering live here so
//! they can be tested without spawning a process.

use std::sync::Once;

pub mod commands;
mod error;

pub use commands::{parse_args, read_source, render_state, render_tokens, Command, TokensArgs, USAGE};
pub use error::CliError;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "MOJO_SCAN_LOG";

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical stderr subscriber, once per process.
///
/// Does nothing unless `MOJO_SCAN_LOG` or `RUST_LOG` is set, so normal runs
/// pay nothing for the scanner's `trace!` calls.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Ok(directives) = std::env::var(LOG_ENV).or_else(|_| std::env::var("RUST_LOG")) else {
            return;
        };
        let layer = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        let result = tracing_subscriber::registry()
            .with(layer)
            .with(EnvFilter::new(directives))
            .try_init();
        if let Err(err) = result {
            eprintln!("warning: tracing not installed: {err}");
        }
    });
}
