//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `-v` selects debug output and `-vv` trace output. Without `-v`, `RUST_LOG` is honored and
/// the default level is `warn`.
pub fn init(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
