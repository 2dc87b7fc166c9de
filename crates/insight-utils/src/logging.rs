//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVES: &str = "warn,stock_insight=info,insight_llm=info";

/// Initialize tracing with the default filter
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVES);
}

/// Initialize tracing, falling back to `default_directives` when `RUST_LOG`
/// is unset or invalid
///
/// Logs go to stderr; stdout carries only rendered reports.
pub fn init_tracing_with(default_directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
