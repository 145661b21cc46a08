//! # MicroBitcoin Telemetry
//!
//! Logging bootstrap shared by the workspace binaries. Library crates only
//! emit `tracing` events; binaries call [`init_logging`] once at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mbc_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     if let Err(e) = init_logging(&config) {
//!         eprintln!("{e}");
//!     }
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MBC_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `MBC_JSON_LOGS` | `false` | JSON output |
//! | `MBC_NETWORK` | `main` | Network name attached to startup event |
//! | `MBC_SERVICE_NAME` | `microbitcoin` | Service name |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber was already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Logs a fatal error and terminates the process with status 1.
///
/// The only sanctioned handling of integrity failures such as a genesis
/// mismatch or a tampered header.
pub fn exit_on_fatal(error: &dyn std::error::Error) -> ! {
    tracing::error!(error = %error, "Fatal error, shutting down");
    eprintln!("fatal: {error}");
    std::process::exit(1)
}
