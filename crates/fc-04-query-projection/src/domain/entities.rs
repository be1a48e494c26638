//! # Projection Results
//!
//! What the read side hands back. Values that fail to decode are still
//! returned, so one bad version never hides the rest.

use serde::{Serialize, Serializer};
use shared_types::LedgerRecord;

/// Value carried by one history version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HistoryValue {
    /// The version decoded as a record.
    Decoded(LedgerRecord),
    /// The version did not decode. The stored bytes, serialized as hex.
    Raw(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    /// The version deleted the key. Serializes as `null`.
    Deleted,
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

impl HistoryValue {
    pub fn record(&self) -> Option<&LedgerRecord> {
        match self {
            Self::Decoded(record) => Some(record),
            _ => None,
        }
    }
}

/// One version of a key, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub tx_id: String,
    pub timestamp: String,
    pub is_delete: bool,
    pub value: HistoryValue,
}

/// Value of one query match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Decoded(LedgerRecord),
    Raw(String),
}

impl QueryValue {
    pub fn record(&self) -> Option<&LedgerRecord> {
        match self {
            Self::Decoded(record) => Some(record),
            Self::Raw(_) => None,
        }
    }
}

/// One record matched by a predicate query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub key: String,
    pub value: QueryValue,
}
