use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{AppConfig, LogFormat};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Calling it twice is harmless; the second install is ignored.
pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            level = %config.logging.level,
            format = ?config.logging.format,
            "logging initialized"
        );
    }
}
