//! # fc-01-ledger-access
//!
//! Ledger Accessor subsystem for Fertilizer-Custody.
//!
//! ## Role in System
//!
//! - **Leaf Dependency**: Every other subsystem reads and writes through the
//!   [`LedgerAccessor`] port defined here.
//! - **External Collaborator Boundary**: The real ledger (replication,
//!   ordering, durability) lives outside the core. This crate only fixes the
//!   contract and ships an in-memory adapter for tests and the runtime.
//!
//! ## Contract
//!
//! | Operation | Returns |
//! |-----------|---------|
//! | `get_state(key)` | bytes or absent |
//! | `put_state(key, bytes)` | unit |
//! | `history_for_key(key)` | cursor over `{tx_id, timestamp, is_delete, value}` oldest first |
//! | `query(predicate)` | cursor over `{key, value}` |
//!
//! Cursors are plain iterators. Whatever resource backs them is released when
//! the cursor is dropped, so an early return or `?` can never leak one.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
