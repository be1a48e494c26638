//! # fc-03-custody-transfer
//!
//! Custody Transfer Engine for Fertilizer-Custody.
//!
//! ## Purpose
//!
//! Validates and applies the custody lifecycle operations (register,
//! initiate, augment, hand off, accept). Enforces the permission matrix and
//! the delivery state machine, and appends the audit trail to every unit it
//! touches.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Membership Agreement | `domain/invariants.rs` - `check_delivery_consistency()` |
//! | INVARIANT-2 | Status Agreement | `domain/invariants.rs` - `check_delivery_consistency()` |
//! | INVARIANT-3 | Append-Only History | `domain/invariants.rs` - `check_single_event_appended()` |
//! | INVARIANT-4 | Immutable Delivery Link | `domain/invariants.rs` - `check_delivery_link_preserved()` |
//! | INVARIANT-5 | No Write Before Validation | `service.rs` - every operation commits last |
//!
//! ## Permission Matrix
//!
//! | Operation | Caller | Delivery Status |
//! |-----------|--------|-----------------|
//! | `register_unit` | originator | INITIATED if joining a delivery |
//! | `initiate_delivery` | originator | (new) |
//! | `augment_delivery` | delivery's originator | INITIATED |
//! | `hand_off` | delivery's originator / carrier | INITIATED / TRANSFERRED_TO_CARRIER |
//! | `accept` | delivery's carrier / recipient | IN_TRANSIT_TO_CARRIER / IN_TRANSIT_TO_RECIPIENT |
//!
//! ## Usage
//!
//! ```ignore
//! let engine = CustodyEngine::new(EngineConfig::default());
//! let ctx = Invocation::new("Org1", "originator-1", stamp.timestamp);
//! engine.register_unit(&ledger, &ctx, UnitSpec::new("F001", "UREA", 50), None)?;
//! ```

pub mod config;
pub mod domain;
pub mod service;

pub use config::EngineConfig;
pub use domain::*;
pub use service::{CustodyEngine, EngineStats};
