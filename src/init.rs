// Logging/tracing setup for the worker binary

use parquet_split_config::{LogConfig, LogFormat};

/// Initialize tracing/logging from the log configuration.
///
/// Logs go to stderr so stdout carries only the per-file status lines.
pub fn init_tracing(config: &LogConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Parse log level from config
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Try to set the global subscriber; ignore error if already set (idempotent)
    let _ = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json().with_writer(std::io::stderr)),
        ),
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().with_writer(std::io::stderr)),
        ),
    };
}
