//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// Reads the filter from `RUST_LOG`, falling back to `info`.
pub fn init_tracing() {
    init_tracing_with_default("info");
}

/// Initialize tracing with a fallback filter used when `RUST_LOG` is unset
///
/// Events go to stderr so stdout stays free for command output. Calling
/// this more than once is harmless; later calls are ignored.
pub fn init_tracing_with_default(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
