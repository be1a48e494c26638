//! # fc-02-entity-repository
//!
//! Canonical Encoder and Entity Repository for Fertilizer-Custody.
//!
//! ## Role in System
//!
//! - **Canonical Encoder** (`codec`): every value written to the ledger is
//!   compact JSON with object keys sorted at every depth. Replicas executing
//!   the same operation therefore write byte-identical values.
//! - **Entity Repository** (`repository`): typed reads of units and
//!   deliveries with existence checks, and ordered commit of a staged
//!   [`WriteSet`].
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Deterministic Encoding | `codec.rs` - `canonicalize()` |
//! | INVARIANT-2 | Schema Validation On Read | `codec.rs` - `decode_record()` |
//! | INVARIANT-3 | Units Written Before Delivery | `write_set.rs` - `WriteSet::entries()` |
//! | INVARIANT-4 | No Write Before Full Encode | `repository.rs` - `commit()` |

pub mod codec;
pub mod repository;
pub mod write_set;

pub use codec::{canonicalize, decode_record, encode, encode_record, encode_value};
pub use repository::EntityRepository;
pub use write_set::WriteSet;
