//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every event
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Network name (main, test, signet, regtest)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "microbitcoin".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            network: "main".to_string(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MBC_SERVICE_NAME`: Service name (default: microbitcoin)
    /// - `MBC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `MBC_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `MBC_NETWORK`: Network name (default: main)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: lookup("MBC_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("MBC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            json_logs: lookup("MBC_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),
            network: lookup("MBC_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Configuration for a named tool, keeping the environment's other
    /// settings.
    pub fn for_tool(name: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("mbc-{name}");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TelemetryConfig::default());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.network, "main");
    }

    #[test]
    fn test_log_level_precedence() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            ("MBC_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.log_level, "debug");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_flags_and_network() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("MBC_JSON_LOGS", "TRUE"),
            ("MBC_NETWORK", "regtest"),
            ("MBC_SERVICE_NAME", "node"),
        ]));
        assert!(config.json_logs);
        assert_eq!(config.network, "regtest");
        assert_eq!(config.service_name, "node");

        let config = TelemetryConfig::from_lookup(lookup(&[("MBC_JSON_LOGS", "yes please")]));
        assert!(!config.json_logs);
    }
}
