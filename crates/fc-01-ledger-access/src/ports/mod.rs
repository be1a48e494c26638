//! # Ports Layer
//!
//! - **Driven Port**: `LedgerAccessor`, implemented by the external ledger.

pub mod ledger;

pub use ledger::*;
