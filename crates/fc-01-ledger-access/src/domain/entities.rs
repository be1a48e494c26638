//! # Ledger Value Types

use serde::{Deserialize, Serialize};

/// Seconds value of the first logical timestamp an in-memory ledger issues.
pub const GENESIS_SECONDS: u64 = 1_700_000_000;

/// One historical version of a key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Id of the transaction that wrote this version.
    pub tx_id: String,
    /// Logical timestamp of that transaction.
    pub timestamp: String,
    /// True if this version deleted the key. `value` is empty then.
    pub is_delete: bool,
    pub value: Vec<u8>,
}

/// One record yielded by a predicate query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub key: String,
    pub value: Vec<u8>,
}

/// Transaction id and logical timestamp assigned by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxStamp {
    pub tx_id: String,
    pub timestamp: String,
}

impl TxStamp {
    /// Stamp for the `sequence`-th transaction.
    ///
    /// Timestamps render as `seconds.nanos` with nine fractional digits so
    /// they sort lexicographically in issue order.
    pub fn for_sequence(sequence: u64) -> Self {
        Self {
            tx_id: format!("tx-{sequence:010}"),
            timestamp: format!("{}.{:09}", GENESIS_SECONDS + sequence, 0),
        }
    }
}
