//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the SWAP tracing/logging system.
///
/// Reads the `SWAP_LOG` environment variable for per-subsystem log levels.
/// Format: `SWAP_LOG=swap_analysis::online=debug,swap_analysis::offline=info`
///
/// Falls back to `swap=info` if `SWAP_LOG` is not set or is invalid.
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("SWAP_LOG").unwrap_or_else(|_| EnvFilter::new("swap=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .init();
    });
}
