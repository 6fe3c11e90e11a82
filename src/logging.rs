//! Logging setup for the CLI
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to the binary. `RUST_LOG` overrides the default level.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr subscriber. Call once near the start of `main`.
///
/// `verbose` raises the default level from `info` to `debug`. A second
/// call is a no-op.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
