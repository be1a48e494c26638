//! # Domain Layer
//!
//! Pure custody rules: the transition table, request validation and the
//! consistency invariants. No ledger access.

pub mod invariants;
pub mod requests;
pub mod transitions;

pub use invariants::*;
pub use requests::*;
pub use transitions::*;
