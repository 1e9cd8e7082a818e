//! Diagnostic logging setup.
//!
//! Diagnostics are `tracing` events written to stderr. They never reach the
//! output file and never influence substitution results.

use tracing_subscriber::EnvFilter;

/// Pick the default filter directive from `--log-level` and `-v` flags.
pub fn default_directive(log_level: &str, verbose: u8) -> &str {
    match verbose {
        0 => log_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global stderr subscriber. `RUST_LOG` takes precedence.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(log_level: &str, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .try_init();
}
