//! # Node Runtime
//!
//! Wires the Fertilizer-Custody subsystems into one process.
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Role chain, engine limits and ledger capabilities from `FC_*` variables |
//! | [`gateway`] | Function-name dispatch onto the engine and the query projection |
//! | [`script`] | JSON-lines driver used by the `custody-node` binary |
//!
//! ## Startup Sequence
//!
//! 1. Load and validate [`RuntimeConfig`]
//! 2. Initialize structured logging
//! 3. Build the ledger and the [`Gateway`]
//! 4. Execute requests from stdin until EOF

pub mod config;
pub mod gateway;
pub mod script;

pub use config::{load_config, ConfigError, RuntimeConfig};
pub use gateway::{Gateway, GatewayFunction};
pub use script::{ScriptRequest, ScriptResponse, ScriptRunner, ScriptSummary};

use fc_01_ledger_access::InMemoryLedger;
use fc_03_custody_transfer::CustodyEngine;

/// Ledger matching the configured capabilities.
pub fn build_ledger(config: &RuntimeConfig) -> InMemoryLedger {
    if config.ledger_rich_query {
        InMemoryLedger::new()
    } else {
        InMemoryLedger::without_rich_query()
    }
}

/// Gateway over a fresh engine for the configured role chain.
pub fn build_gateway(config: &RuntimeConfig) -> Gateway {
    Gateway::new(CustodyEngine::new(config.engine.clone()))
}
