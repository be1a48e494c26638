//! # Domain Layer
//!
//! Value types exchanged over the ledger port and the selector matcher used
//! by the in-memory adapter. No I/O.

pub mod entities;
pub mod selector;

pub use entities::*;
pub use selector::*;
