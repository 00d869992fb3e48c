//! Tracing subscriber setup for host binaries and tests.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call repeatedly; only the first call installs a subscriber.
pub fn init() {
    init_with(DEFAULT_FILTER);
}

/// Like [`init`], but falls back to `directives` when `RUST_LOG` is unset.
pub fn init_with(directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
