//! # Entity Repository
//!
//! Typed access to units and deliveries over a borrowed ledger handle.
//!
//! The repository holds no state of its own. It is built per operation from
//! the accessor handle the caller passes in, which keeps every read and
//! write of one invocation on the same ledger transaction.

use crate::codec::{decode_record, encode_record};
use crate::write_set::WriteSet;
use fc_01_ledger_access::LedgerAccessor;
use shared_types::{CustodyError, Delivery, LedgerRecord, Unit};
use tracing::debug;

/// Typed get/put wrapper over a [`LedgerAccessor`].
pub struct EntityRepository<'a, L: LedgerAccessor + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: LedgerAccessor + ?Sized> EntityRepository<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Decoded record under `key`, or `None` if the key is absent.
    pub fn get_record(&self, key: &str) -> Result<Option<LedgerRecord>, CustodyError> {
        match self.ledger.get_state(key)? {
            Some(bytes) => decode_record(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// True if any record, of either kind, occupies `key`.
    pub fn exists(&self, key: &str) -> Result<bool, CustodyError> {
        Ok(self.ledger.get_state(key)?.is_some())
    }

    /// Fail with `AlreadyExists` if `key` is taken by a unit or a delivery.
    pub fn ensure_absent(&self, key: &str) -> Result<(), CustodyError> {
        if self.exists(key)? {
            return Err(CustodyError::already_exists(key));
        }
        Ok(())
    }

    /// Unit stored under `unit_id`.
    ///
    /// A delivery under that key counts as absent.
    pub fn get_unit(&self, unit_id: &str) -> Result<Unit, CustodyError> {
        match self.get_record(unit_id)? {
            Some(LedgerRecord::Unit(unit)) => Ok(unit),
            Some(LedgerRecord::Delivery(_)) | None => Err(CustodyError::not_found(unit_id)),
        }
    }

    /// Delivery stored under `delivery_id`.
    ///
    /// A unit under that key counts as absent.
    pub fn get_delivery(&self, delivery_id: &str) -> Result<Delivery, CustodyError> {
        match self.get_record(delivery_id)? {
            Some(LedgerRecord::Delivery(delivery)) => Ok(delivery),
            Some(LedgerRecord::Unit(_)) | None => Err(CustodyError::not_found(delivery_id)),
        }
    }

    /// Every member unit of `delivery`, in member order.
    pub fn get_members(&self, delivery: &Delivery) -> Result<Vec<Unit>, CustodyError> {
        delivery
            .unit_ids
            .iter()
            .map(|unit_id| self.get_unit(unit_id))
            .collect()
    }

    /// Write one record.
    pub fn put_record(&self, record: &LedgerRecord) -> Result<(), CustodyError> {
        let bytes = encode_record(record)?;
        self.ledger.put_state(record.key(), bytes)?;
        Ok(())
    }

    /// Write every staged record, units first, then the delivery.
    ///
    /// All records are encoded before the first write is issued, so an
    /// encoding failure leaves the ledger untouched. Returns the number of
    /// keys written.
    pub fn commit(&self, write_set: WriteSet) -> Result<usize, CustodyError> {
        let encoded = write_set
            .entries()
            .map(|record| {
                let bytes = encode_record(&record)?;
                Ok((record.key().to_string(), bytes))
            })
            .collect::<Result<Vec<_>, CustodyError>>()?;

        for (key, bytes) in &encoded {
            self.ledger.put_state(key, bytes.clone())?;
        }

        debug!(keys = encoded.len(), "Write set committed");
        Ok(encoded.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
