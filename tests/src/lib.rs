//! # Fertilizer-Custody Test Suite
//!
//! Unified test crate for behavior that spans subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs          # Shared ledger + engine harness
//!     ├── custody_flows.rs     # End-to-end custody chains
//!     ├── atomicity.rs         # Rejected operations leave the ledger untouched
//!     ├── history_replay.rs    # Audit trail and queries through the projection
//!     ├── gateway_flows.rs     # Function-name dispatch and script mode
//!     └── random_operations.rs # Property tests over arbitrary call sequences
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fc-tests
//! cargo test -p fc-tests integration::atomicity::
//! ```

pub mod integration;
