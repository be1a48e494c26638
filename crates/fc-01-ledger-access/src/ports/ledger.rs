use crate::domain::{KeyModification, QueryRecord};
use shared_types::LedgerError;

/// Forward-only cursor over the versions of one key, oldest first.
pub type HistoryCursor<'a> = Box<dyn Iterator<Item = Result<KeyModification, LedgerError>> + 'a>;

/// Forward-only cursor over the records matching a predicate.
pub type QueryCursor<'a> = Box<dyn Iterator<Item = Result<QueryRecord, LedgerError>> + 'a>;

/// Key-value ledger abstraction consumed by the core.
///
/// Writes issued during one invocation belong to the enclosing ledger
/// transaction. Ordering and conflict handling across invocations are the
/// ledger's job.
pub trait LedgerAccessor {
    /// Current value under `key`, if any.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write `value` under `key`.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Every version ever written under `key`, oldest first.
    fn history_for_key(&self, key: &str) -> Result<HistoryCursor<'_>, LedgerError>;

    /// Records matching an opaque predicate string.
    ///
    /// Stores without an index return [`LedgerError::QueryUnsupported`].
    fn query(&self, predicate: &str) -> Result<QueryCursor<'_>, LedgerError>;
}

impl<L: LedgerAccessor + ?Sized> LedgerAccessor for &L {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        (**self).put_state(key, value)
    }

    fn history_for_key(&self, key: &str) -> Result<HistoryCursor<'_>, LedgerError> {
        (**self).history_for_key(key)
    }

    fn query(&self, predicate: &str) -> Result<QueryCursor<'_>, LedgerError> {
        (**self).query(predicate)
    }
}
