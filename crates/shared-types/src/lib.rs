//! # Shared Types Crate
//!
//! This crate contains the custody entities stored on the ledger, the error
//! taxonomy returned by every subsystem, the caller identity supplied per
//! invocation and the role chain the custody engine enforces.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Unit`, `Delivery` and `CustodyEvent` are
//!   defined once here and shared by the repository, engine and projections.
//! - **Tagged Records**: Everything written under a ledger key is a
//!   [`LedgerRecord`], so a unit can never be decoded as a delivery.
//! - **Identity Is Ambient**: Operations never take caller identity as an
//!   argument; it always comes from an [`IdentityContext`].

pub mod entities;
pub mod errors;
pub mod identity;
pub mod roles;

pub use entities::*;
pub use errors::*;
pub use identity::*;
pub use roles::*;
