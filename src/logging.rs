//! Tracing setup for the binary.
//!
//! Logs go to stderr so normalized output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Env var holding a `tracing` filter directive; falls back to `RUST_LOG`.
pub const LOG_ENV: &str = "CHARTPREP_LOG";

/// Filter for a `-v` count when no env var is set.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "chartprep=warn",
        1 => "chartprep=info",
        2 => "chartprep=debug",
        _ => "chartprep=trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}
