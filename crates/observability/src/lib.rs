//! Tracing/logging setup shared by every process that embeds the domain.

/// Environment-driven configuration.
pub mod config;

/// Tracing subscriber installation.
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize process-wide tracing with an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init_with(config);
}
