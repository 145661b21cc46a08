//! Subscriber installation.
//!
//! One global `tracing` subscriber per process: an `EnvFilter` built from
//! the configured level, then either a JSON or a human-readable `fmt`
//! layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Filter for `config`, rejecting malformed directives.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::InvalidFilter(format!("{}: {}", config.log_level, e)))
}

/// Installs the global subscriber.
///
/// Fails if the filter is invalid or a subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        network = %config.network,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_validation() {
        let mut config = TelemetryConfig::default();
        assert!(env_filter(&config).is_ok());

        config.log_level = "mbc_01_chain_params=debug,info".to_string();
        assert!(env_filter(&config).is_ok());

        config.log_level = "mbc=verbose".to_string();
        assert!(matches!(
            env_filter(&config),
            Err(TelemetryError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig::default();
        assert!(init_logging(&config).is_ok());
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
