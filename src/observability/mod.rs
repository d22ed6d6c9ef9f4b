//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// `-v` raises the default level to debug; `RUST_LOG` still wins when
/// set. Logs go to stderr so table and JSON output stay pipeable.
/// Safe to call once per process; later calls are ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("marquee={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
