//! Logging setup for the `gp-snapshot` binary.
//!
//! Library code logs through `tracing` (and `log` in the config loader);
//! the binary installs a `tracing-subscriber` formatter on stderr so that
//! stdout carries only the rendered chart. `RUST_LOG` takes precedence over
//! the `-v` count.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
