//! # In-Memory Ledger
//!
//! `LedgerAccessor` over ordered maps, with per-key version history and a
//! selector query engine. Used by the test suite and by the runtime's script
//! mode. A production deployment plugs the real ledger into the same port.

use crate::domain::{KeyModification, QueryRecord, Selector, TxStamp};
use crate::ports::{HistoryCursor, LedgerAccessor, QueryCursor};
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use shared_types::LedgerError;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Ordered copy of every live key and its bytes.
pub type LedgerSnapshot = BTreeMap<String, Vec<u8>>;

/// In-memory implementation of `LedgerAccessor`.
pub struct InMemoryLedger {
    state: RwLock<LedgerSnapshot>,
    history: RwLock<HashMap<String, Vec<KeyModification>>>,
    /// Sequence number and stamp of the current transaction.
    clock: Mutex<(u64, TxStamp)>,
    rich_query: bool,
    open_cursors: Arc<AtomicUsize>,
}

impl InMemoryLedger {
    /// Ledger with indexed-query support.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            history: RwLock::new(HashMap::new()),
            clock: Mutex::new((0, TxStamp::for_sequence(0))),
            rich_query: true,
            open_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Ledger backed by a plain key-value store: `query` is unsupported.
    pub fn without_rich_query() -> Self {
        Self {
            rich_query: false,
            ..Self::new()
        }
    }

    /// Open the next transaction and return its stamp. Every write until the
    /// next call is recorded under this stamp.
    pub fn begin_transaction(&self) -> TxStamp {
        let mut clock = self.clock.lock();
        clock.0 += 1;
        clock.1 = TxStamp::for_sequence(clock.0);
        clock.1.clone()
    }

    /// Stamp of the transaction currently open.
    pub fn current_transaction(&self) -> TxStamp {
        self.clock.lock().1.clone()
    }

    /// Remove `key`, recording a deletion in its history.
    ///
    /// The custody core never deletes. This exists so ledgers shared with
    /// other applications can be modelled.
    pub fn delete_state(&self, key: &str) {
        let stamp = self.current_transaction();
        self.state.write().remove(key);
        self.history
            .write()
            .entry(key.to_string())
            .or_default()
            .push(KeyModification {
                tx_id: stamp.tx_id,
                timestamp: stamp.timestamp,
                is_delete: true,
                value: Vec::new(),
            });
    }

    /// Copy of the current world state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.read().clone()
    }

    /// SHA-256 over every key and value in key order, hex encoded.
    pub fn state_digest(&self) -> String {
        let state = self.state.read();
        let mut hasher = Sha256::new();
        for (key, value) in state.iter() {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key.as_bytes());
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(value);
        }
        hex::encode(hasher.finalize())
    }

    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Cursors handed out and not yet dropped.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn track<I>(&self, inner: I) -> TrackedCursor<I> {
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        TrackedCursor {
            inner,
            open_cursors: Arc::clone(&self.open_cursors),
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerAccessor for InMemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.read().get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        if key.is_empty() {
            return Err(LedgerError::Backend("empty key".to_string()));
        }
        let stamp = self.current_transaction();
        self.state.write().insert(key.to_string(), value.clone());
        self.history
            .write()
            .entry(key.to_string())
            .or_default()
            .push(KeyModification {
                tx_id: stamp.tx_id,
                timestamp: stamp.timestamp,
                is_delete: false,
                value,
            });
        Ok(())
    }

    fn history_for_key(&self, key: &str) -> Result<HistoryCursor<'_>, LedgerError> {
        let versions = self.history.read().get(key).cloned().unwrap_or_default();
        Ok(Box::new(self.track(versions.into_iter().map(Ok::<_, LedgerError>))))
    }

    fn query(&self, predicate: &str) -> Result<QueryCursor<'_>, LedgerError> {
        if !self.rich_query {
            return Err(LedgerError::QueryUnsupported);
        }
        let selector = Selector::parse(predicate)?;

        let matches: Vec<QueryRecord> = self
            .state
            .read()
            .iter()
            .filter(|(_, value)| {
                serde_json::from_slice::<serde_json::Value>(value)
                    .map(|document| selector.matches(&document))
                    .unwrap_or(false)
            })
            .map(|(key, value)| QueryRecord {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        debug!(predicate, matched = matches.len(), "Selector query evaluated");
        Ok(Box::new(self.track(matches.into_iter().map(Ok::<_, LedgerError>))))
    }
}

/// Iterator wrapper that counts as an open cursor until dropped.
struct TrackedCursor<I> {
    inner: I,
    open_cursors: Arc<AtomicUsize>,
}

impl<I: Iterator> Iterator for TrackedCursor<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<I> Drop for TrackedCursor<I> {
    fn drop(&mut self) {
        self.open_cursors.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// TESTS
// =============================================================================
