//! # Canonical Encoder
//!
//! Values are converted to a `serde_json::Value`, every object is rebuilt
//! with its keys in lexicographic order, and the result is written with the
//! compact writer (no whitespace). Integers are written in plain decimal, and
//! no field holds a wall-clock time, so the bytes depend only on the logical
//! value.
//!
//! Decoding is strict. The input must parse, match the record schema
//! exactly, and already be in canonical form. Anything else is a
//! `MalformedRecord`.

use serde::Serialize;
use serde_json::{Map, Value};
use shared_types::{CustodyError, LedgerRecord};
use std::collections::BTreeMap;

/// Rebuild `value` with object keys sorted at every depth.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, inner)| (key, canonicalize(inner)))
                .collect();
            let mut out = Map::new();
            for (key, inner) in sorted {
                out.insert(key, inner);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        scalar => scalar,
    }
}

/// Canonical bytes of an already-built JSON value.
pub fn encode_value(value: Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&canonicalize(value))
}

/// Canonical bytes of any serializable value.
///
/// `key` names the record in the error if the value cannot be represented
/// as JSON (for example a map with non-string keys).
pub fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, CustodyError> {
    let json = serde_json::to_value(value)
        .map_err(|e| CustodyError::malformed(key, format!("cannot encode: {e}")))?;
    encode_value(json).map_err(|e| CustodyError::malformed(key, format!("cannot encode: {e}")))
}

/// Canonical bytes of a ledger record.
pub fn encode_record(record: &LedgerRecord) -> Result<Vec<u8>, CustodyError> {
    encode(record.key(), record)
}

/// Decode a ledger record stored under `key`.
pub fn decode_record(key: &str, bytes: &[u8]) -> Result<LedgerRecord, CustodyError> {
    let json: Value = serde_json::from_slice(bytes)
        .map_err(|e| CustodyError::malformed(key, format!("invalid JSON: {e}")))?;

    let canonical = encode_value(json.clone())
        .map_err(|e| CustodyError::malformed(key, format!("cannot re-encode: {e}")))?;
    if canonical != bytes {
        return Err(CustodyError::malformed(key, "non-canonical encoding"));
    }

    let record: LedgerRecord = serde_json::from_value(json)
        .map_err(|e| CustodyError::malformed(key, format!("schema violation: {e}")))?;

    if record.key() != key {
        return Err(CustodyError::malformed(
            key,
            format!("record id {} does not match its key", record.key()),
        ));
    }

    Ok(record)
}

// =============================================================================
// TESTS
// =============================================================================
