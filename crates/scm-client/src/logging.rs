//! Logging setup for binaries embedding the client
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application. `init` is a convenience for small tools.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` (e.g. `"info"` or `"scm_client=debug"`)
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
