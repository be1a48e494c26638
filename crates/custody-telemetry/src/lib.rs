//! # Custody Telemetry
//!
//! Logging bootstrap for Fertilizer-Custody processes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custody_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FC_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directives |
//! | `FC_JSON_LOGS` | `false` (`true` in containers) | JSON lines instead of text |
//! | `FC_LOG_ANSI` | `true` | Colorized text output |
//! | `FC_SERVICE_NAME` | `fertilizer-custody` | Service name in the startup line |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
