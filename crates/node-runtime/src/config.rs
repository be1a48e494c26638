//! # Runtime Configuration
//!
//! Role chain, engine limits and ledger capabilities for one node process.
//!
//! Every value has a default, so an empty environment yields a working
//! three-role chain `Org1 -> Org2 -> Org3`.

use custody_telemetry::TelemetryConfig;
use fc_03_custody_transfer::EngineConfig;
use shared_types::{RoleMap, RoleMapError};
use std::env;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Custody engine settings, including the role chain.
    pub engine: EngineConfig,
    /// Log output settings.
    pub telemetry: TelemetryConfig,
    /// Whether the ledger answers selector queries.
    pub ledger_rich_query: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            telemetry: TelemetryConfig::default(),
            ledger_rich_query: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid role chain: {0}")]
    Roles(#[from] RoleMapError),

    #[error("{var} has invalid value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("FC_MAX_UNITS_PER_DELIVERY must be at least 1")]
    ZeroDeliveryLimit,
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration from an arbitrary variable source.
    ///
    /// # Environment Variables
    ///
    /// - `FC_ORIGINATOR_ORG` (default `Org1`)
    /// - `FC_CARRIER_ORG` (default `Org2`, empty for a two-role chain)
    /// - `FC_RECIPIENT_ORG` (default `Org3`)
    /// - `FC_ENFORCE_CONSISTENCY` (default `true`)
    /// - `FC_MAX_UNITS_PER_DELIVERY` (default `1000`)
    /// - `FC_LEDGER_RICH_QUERY` (default `true`)
    /// - plus everything [`TelemetryConfig::from_lookup`] reads
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let originator = lookup("FC_ORIGINATOR_ORG")
            .unwrap_or_else(|| defaults.roles.originator().to_string());
        let recipient = lookup("FC_RECIPIENT_ORG")
            .unwrap_or_else(|| defaults.roles.recipient().to_string());
        let roles = match lookup("FC_CARRIER_ORG") {
            Some(carrier) if carrier.trim().is_empty() => RoleMap::two_role(originator, recipient),
            Some(carrier) => RoleMap::three_role(originator, carrier, recipient),
            None => match defaults.roles.carrier() {
                Some(carrier) => RoleMap::three_role(originator, carrier, recipient),
                None => RoleMap::two_role(originator, recipient),
            },
        };

        let mut engine = defaults.with_roles(roles);
        if let Some(value) = lookup("FC_ENFORCE_CONSISTENCY") {
            engine = engine.with_consistency_checks(parse_flag("FC_ENFORCE_CONSISTENCY", &value)?);
        }
        if let Some(value) = lookup("FC_MAX_UNITS_PER_DELIVERY") {
            let limit = value
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: "FC_MAX_UNITS_PER_DELIVERY",
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            engine = engine.with_max_units_per_delivery(limit);
        }

        let ledger_rich_query = match lookup("FC_LEDGER_RICH_QUERY") {
            Some(value) => parse_flag("FC_LEDGER_RICH_QUERY", &value)?,
            None => true,
        };

        Ok(Self {
            engine,
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ledger_rich_query,
        })
    }

    /// Check the configuration before the node starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.engine.max_units_per_delivery == 0 {
            return Err(ConfigError::ZeroDeliveryLimit);
        }
        Ok(())
    }
}

/// Load and validate the node configuration from the environment.
pub fn load_config() -> Result<RuntimeConfig, ConfigError> {
    let config = RuntimeConfig::from_env()?;
    config.validate()?;
    Ok(config)
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
