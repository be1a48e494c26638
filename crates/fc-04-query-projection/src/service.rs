//! # Query Projection Service
//!
//! Read-only operations over the ledger accessor and the canonical decoder.
//! Nothing here writes.

use crate::domain::{HistoryEntry, HistoryValue, QueryResult, QueryValue};
use fc_01_ledger_access::{HistoryCursor, KeyModification, LedgerAccessor};
use fc_02_entity_repository::decode_record;
use shared_types::{CustodyError, Delivery, LedgerRecord, Unit};
use tracing::{debug, instrument, warn};

/// Read side of the custody ledger.
pub struct QueryProjection<'a, L: LedgerAccessor + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: LedgerAccessor + ?Sized> QueryProjection<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Decoded record under `key`, either kind.
    pub fn read_record(&self, key: &str) -> Result<LedgerRecord, CustodyError> {
        let bytes = self
            .ledger
            .get_state(key)?
            .ok_or_else(|| CustodyError::not_found(key))?;
        decode_record(key, &bytes)
    }

    /// Unit under `unit_id`. A delivery under that key reads as `NotFound`.
    pub fn read_unit(&self, unit_id: &str) -> Result<Unit, CustodyError> {
        match self.read_record(unit_id)? {
            LedgerRecord::Unit(unit) => Ok(unit),
            LedgerRecord::Delivery(_) => Err(CustodyError::not_found(unit_id)),
        }
    }

    /// Delivery under `delivery_id`. A unit under that key reads as `NotFound`.
    pub fn read_delivery(&self, delivery_id: &str) -> Result<Delivery, CustodyError> {
        match self.read_record(delivery_id)? {
            LedgerRecord::Delivery(delivery) => Ok(delivery),
            LedgerRecord::Unit(_) => Err(CustodyError::not_found(delivery_id)),
        }
    }

    /// Every version of `key`, oldest first.
    ///
    /// The replay is lazy and holds the ledger cursor until it is dropped or
    /// exhausted. A key that was never written yields nothing.
    #[instrument(skip(self))]
    pub fn history(&self, key: &str) -> Result<HistoryReplay<'a>, CustodyError> {
        let ledger: &'a L = self.ledger;
        let cursor = ledger.history_for_key(key)?;
        debug!("History cursor opened");
        Ok(HistoryReplay {
            key: key.to_string(),
            cursor,
        })
    }

    /// Run `predicate` through the ledger's indexed query and collect every
    /// match.
    #[instrument(skip(self))]
    pub fn query(&self, predicate: &str) -> Result<Vec<QueryResult>, CustodyError> {
        let cursor = self.ledger.query(predicate)?;
        let mut results = Vec::new();
        for item in cursor {
            let record = item?;
            let value = match decode_record(&record.key, &record.value) {
                Ok(decoded) => QueryValue::Decoded(decoded),
                Err(err) => {
                    warn!(key = %record.key, error = %err, "Query match did not decode");
                    QueryValue::Raw(String::from_utf8_lossy(&record.value).into_owned())
                }
            };
            results.push(QueryResult {
                key: record.key,
                value,
            });
        }
        debug!(matched = results.len(), "Query materialized");
        Ok(results)
    }
}

/// Lazy, forward-only replay of one key's versions.
pub struct HistoryReplay<'a> {
    key: String,
    cursor: HistoryCursor<'a>,
}

impl HistoryReplay<'_> {
    fn entry(&self, modification: KeyModification) -> HistoryEntry {
        let value = if modification.is_delete {
            HistoryValue::Deleted
        } else {
            match decode_record(&self.key, &modification.value) {
                Ok(record) => HistoryValue::Decoded(record),
                Err(err) => {
                    warn!(
                        key = %self.key,
                        tx_id = %modification.tx_id,
                        error = %err,
                        "History version did not decode"
                    );
                    HistoryValue::Raw(modification.value)
                }
            }
        };
        HistoryEntry {
            tx_id: modification.tx_id,
            timestamp: modification.timestamp,
            is_delete: modification.is_delete,
            value,
        }
    }
}

impl Iterator for HistoryReplay<'_> {
    type Item = Result<HistoryEntry, CustodyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.cursor.next()?;
        Some(next.map(|m| self.entry(m)).map_err(CustodyError::from))
    }
}

// =============================================================================
// TESTS
// =============================================================================
