//! Tracing initialization for the CLI.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber. `debug` forces DEBUG regardless of
/// RUST_LOG; otherwise RUST_LOG wins, falling back to INFO.
pub fn init_tracing(debug: bool) {
    let env_filter = resolve_env_filter(debug);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn resolve_env_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()))
    }
}
