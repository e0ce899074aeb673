//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ObservabilityConfig};

/// Initialize tracing/logging for the process from the environment.
///
/// An invalid `ORDERDESK_LOG_FORMAT` falls back to the defaults with a warning.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    match ObservabilityConfig::from_env() {
        Ok(config) => init_with(&config),
        Err(err) => {
            init_with(&ObservabilityConfig::default());
            tracing::warn!(error = %err, "invalid logging configuration; using defaults");
        }
    }
}

/// Initialize tracing/logging with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match config.format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
