//! # Transition Table
//!
//! Which party may move a delivery out of each status, and where it goes.
//!
//! The expected transition is a function of the delivery status and the role
//! chain only. The engine then checks the caller against the party recorded
//! for that role.
//!
//! | From | Operation | Actor | Counterparty | To |
//! |------|-----------|-------|--------------|----|
//! | INITIATED | hand off | originator | carrier | IN_TRANSIT_TO_CARRIER |
//! | INITIATED (no carrier) | hand off | originator | recipient | IN_TRANSIT_TO_RECIPIENT |
//! | IN_TRANSIT_TO_CARRIER | accept | carrier | originator | TRANSFERRED_TO_CARRIER |
//! | TRANSFERRED_TO_CARRIER | hand off | carrier | recipient | IN_TRANSIT_TO_RECIPIENT |
//! | IN_TRANSIT_TO_RECIPIENT | accept | recipient | carrier, or originator with no carrier | COMPLETED |

use shared_types::{DeliveryStatus, EventAction, Role, RoleMap};

/// A permitted hand-off out of one delivery status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandOffRule {
    pub from: DeliveryStatus,
    /// Role that must be performing the hand-off.
    pub actor: Role,
    /// Role the delivery is handed to.
    pub target: Role,
    pub next: DeliveryStatus,
}

/// A permitted acceptance out of one delivery status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptRule {
    pub from: DeliveryStatus,
    /// Role that must be accepting.
    pub acceptor: Role,
    /// Role every member unit must still be owned by.
    pub previous_owner: Role,
    pub next: DeliveryStatus,
    pub action: EventAction,
}

/// Hand-off permitted from `status` under `roles`, if any.
pub fn hand_off_rule(roles: &RoleMap, status: DeliveryStatus) -> Option<HandOffRule> {
    match status {
        DeliveryStatus::Initiated if roles.has_carrier() => Some(HandOffRule {
            from: status,
            actor: Role::Originator,
            target: Role::Carrier,
            next: DeliveryStatus::InTransitToCarrier,
        }),
        DeliveryStatus::Initiated => Some(HandOffRule {
            from: status,
            actor: Role::Originator,
            target: Role::Recipient,
            next: DeliveryStatus::InTransitToRecipient,
        }),
        DeliveryStatus::TransferredToCarrier if roles.has_carrier() => Some(HandOffRule {
            from: status,
            actor: Role::Carrier,
            target: Role::Recipient,
            next: DeliveryStatus::InTransitToRecipient,
        }),
        _ => None,
    }
}

/// Acceptance permitted from `status` under `roles`, if any.
pub fn accept_rule(roles: &RoleMap, status: DeliveryStatus) -> Option<AcceptRule> {
    match status {
        DeliveryStatus::InTransitToCarrier if roles.has_carrier() => Some(AcceptRule {
            from: status,
            acceptor: Role::Carrier,
            previous_owner: Role::Originator,
            next: DeliveryStatus::TransferredToCarrier,
            action: EventAction::ReceivedByCarrier,
        }),
        DeliveryStatus::InTransitToRecipient => Some(AcceptRule {
            from: status,
            acceptor: Role::Recipient,
            previous_owner: if roles.has_carrier() {
                Role::Carrier
            } else {
                Role::Originator
            },
            next: DeliveryStatus::Completed,
            action: EventAction::ReceivedByRecipient,
        }),
        _ => None,
    }
}
