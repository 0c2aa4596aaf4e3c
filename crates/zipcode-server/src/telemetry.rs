//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a default filter.
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .init();
}
