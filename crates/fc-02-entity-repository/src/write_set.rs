//! # Write Set
//!
//! Records staged by one operation, committed together at the end.
//!
//! The custody engine never writes while validating. It stages every new
//! unit and delivery value here and hands the set to
//! [`EntityRepository::commit`](crate::EntityRepository::commit) once all
//! preconditions have passed.

use shared_types::{Delivery, LedgerRecord, Unit};

/// Staged units and at most one delivery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSet {
    units: Vec<Unit>,
    delivery: Option<Delivery>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a unit. A unit with the same id staged earlier is replaced in
    /// place, keeping its original position.
    pub fn stage_unit(&mut self, unit: Unit) {
        match self.units.iter_mut().find(|u| u.unit_id == unit.unit_id) {
            Some(existing) => *existing = unit,
            None => self.units.push(unit),
        }
    }

    /// Stage the delivery. Replaces any delivery staged earlier.
    pub fn stage_delivery(&mut self, delivery: Delivery) {
        self.delivery = Some(delivery);
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.unit_id == unit_id)
    }

    pub fn delivery(&self) -> Option<&Delivery> {
        self.delivery.as_ref()
    }

    pub fn len(&self) -> usize {
        self.units.len() + usize::from(self.delivery.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in commit order: every unit, then the delivery.
    pub fn entries(&self) -> impl Iterator<Item = LedgerRecord> + '_ {
        self.units
            .iter()
            .cloned()
            .map(LedgerRecord::Unit)
            .chain(self.delivery.iter().cloned().map(LedgerRecord::Delivery))
    }
}
