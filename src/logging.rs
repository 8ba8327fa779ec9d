/// Logging setup
///
/// Installs a `tracing` subscriber with an env-style filter.
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// An unparsable filter falls back to `info`. Calling this twice is
/// harmless; the second subscriber is simply not installed.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}, using 'info'", filter, e);
        EnvFilter::new("info")
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
