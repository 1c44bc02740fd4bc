//! `tracing` subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` if set and valid, else `fallback`.
pub fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a fmt subscriber writing to stderr.
///
/// Stdout is reserved for protocol responses. Returns an error if a global
/// subscriber is already installed.
pub fn init_logging(fallback: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(fallback))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()
}
