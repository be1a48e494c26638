//! # Domain Invariants
//!
//! Checks that must hold for every delivery and its members after each
//! operation. The engine runs them against the staged write set before
//! anything is committed.
//!
//! - INVARIANT-1: Membership Agreement. `unit_ids` and the units pointing at
//!   the delivery are the same set.
//! - INVARIANT-2: Status Agreement. Every member carries the unit status
//!   implied by the delivery status.
//! - INVARIANT-3: Append-Only History. A transition appends exactly one
//!   event and leaves earlier events untouched.
//! - INVARIANT-4: Immutable Delivery Link. A unit's `delivery_id`, once set,
//!   never changes.

use shared_types::{Delivery, Unit, UnitStatus};
use std::collections::HashSet;
use thiserror::Error;

/// A broken delivery/member relationship.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyViolation {
    #[error("delivery lists {unit_id} more than once")]
    DuplicateMember { unit_id: String },

    #[error("member {unit_id} is missing from the checked set")]
    MissingMember { unit_id: String },

    #[error("unit {unit_id} is not a member of the delivery")]
    UnexpectedMember { unit_id: String },

    #[error("unit {unit_id} points at delivery {found:?}")]
    WrongDeliveryLink {
        unit_id: String,
        found: Option<String>,
    },

    #[error("unit {unit_id} is {actual}, expected {expected}")]
    StatusDisagreement {
        unit_id: String,
        expected: UnitStatus,
        actual: UnitStatus,
    },
}

/// INVARIANT-1 and INVARIANT-2 for one delivery.
///
/// `members` must be the full set of units that belong to `delivery`.
pub fn check_delivery_consistency(
    delivery: &Delivery,
    members: &[Unit],
) -> Result<(), ConsistencyViolation> {
    let mut listed = HashSet::new();
    for unit_id in &delivery.unit_ids {
        if !listed.insert(unit_id.as_str()) {
            return Err(ConsistencyViolation::DuplicateMember {
                unit_id: unit_id.clone(),
            });
        }
    }

    let present: HashSet<&str> = members.iter().map(|u| u.unit_id.as_str()).collect();
    if let Some(missing) = delivery
        .unit_ids
        .iter()
        .find(|id| !present.contains(id.as_str()))
    {
        return Err(ConsistencyViolation::MissingMember {
            unit_id: missing.clone(),
        });
    }

    let expected = delivery.status.member_status();
    for unit in members {
        if !listed.contains(unit.unit_id.as_str()) {
            return Err(ConsistencyViolation::UnexpectedMember {
                unit_id: unit.unit_id.clone(),
            });
        }
        if unit.delivery_id.as_deref() != Some(delivery.delivery_id.as_str()) {
            return Err(ConsistencyViolation::WrongDeliveryLink {
                unit_id: unit.unit_id.clone(),
                found: unit.delivery_id.clone(),
            });
        }
        if unit.status != expected {
            return Err(ConsistencyViolation::StatusDisagreement {
                unit_id: unit.unit_id.clone(),
                expected,
                actual: unit.status,
            });
        }
    }

    Ok(())
}

/// INVARIANT-3: `after` is `before` with exactly one event appended.
#[must_use]
pub fn check_single_event_appended(before: &Unit, after: &Unit) -> bool {
    after.history.len() == before.history.len() + 1
        && after.history.starts_with(&before.history)
}

/// INVARIANT-4: the delivery link was either unset or is unchanged.
#[must_use]
pub fn check_delivery_link_preserved(before: &Unit, after: &Unit) -> bool {
    before.delivery_id.is_none() || before.delivery_id == after.delivery_id
}
