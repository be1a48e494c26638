//! # Custody Entities
//!
//! The records that live on the ledger.
//!
//! ## Clusters
//!
//! - **Goods**: `Unit`, `UnitStatus`
//! - **Batches**: `Delivery`, `DeliveryStatus`
//! - **Audit Trail**: `CustodyEvent`, `EventAction`
//! - **Envelope**: `LedgerRecord` (tagged with `docType`)
//!
//! All structs reject unknown fields and require every field to be present,
//! including the nullable ones, so a stored value either matches the schema
//! exactly or fails to decode.

use crate::roles::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// STATUS ENUMS
// =============================================================================

/// Lifecycle status of a single unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    /// Registered and held by the originator.
    Registered,
    /// Marked for hand-off; ownership has not moved yet.
    InDelivery,
    /// Accepted by the carrier.
    WithCarrier,
    /// Accepted by the recipient. Terminal.
    Delivered,
}

impl UnitStatus {
    /// Ledger spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::InDelivery => "IN_DELIVERY",
            Self::WithCarrier => "WITH_CARRIER",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a delivery.
///
/// ```text
/// INITIATED ──handOff──→ IN_TRANSIT_TO_CARRIER ──accept──→ TRANSFERRED_TO_CARRIER
///     │                                                          │
///     │ (two-role chain)                                     handOff
///     ↓                                                          ↓
/// IN_TRANSIT_TO_RECIPIENT ←──────────────────────────────────────┘
///     │
///  accept
///     ↓
/// COMPLETED
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Initiated,
    InTransitToCarrier,
    TransferredToCarrier,
    InTransitToRecipient,
    Completed,
}

impl DeliveryStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [DeliveryStatus; 5] = [
        Self::Initiated,
        Self::InTransitToCarrier,
        Self::TransferredToCarrier,
        Self::InTransitToRecipient,
        Self::Completed,
    ];

    /// Ledger spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "INITIATED",
            Self::InTransitToCarrier => "IN_TRANSIT_TO_CARRIER",
            Self::TransferredToCarrier => "TRANSFERRED_TO_CARRIER",
            Self::InTransitToRecipient => "IN_TRANSIT_TO_RECIPIENT",
            Self::Completed => "COMPLETED",
        }
    }

    /// Parse the ledger spelling. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// The status every member unit must carry while the delivery is in
    /// this status.
    pub fn member_status(&self) -> UnitStatus {
        match self {
            Self::Initiated => UnitStatus::Registered,
            Self::InTransitToCarrier | Self::InTransitToRecipient => UnitStatus::InDelivery,
            Self::TransferredToCarrier => UnitStatus::WithCarrier,
            Self::Completed => UnitStatus::Delivered,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a unit in a [`CustodyEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    InitialRegistration,
    AddedToDelivery,
    TransferInitiated,
    ReceivedByCarrier,
    ReceivedByRecipient,
}

impl EventAction {
    /// The acceptance event recorded when `role` takes custody.
    ///
    /// Only carriers and recipients ever accept.
    pub fn received_by(role: Role) -> Option<Self> {
        match role {
            Role::Carrier => Some(Self::ReceivedByCarrier),
            Role::Recipient => Some(Self::ReceivedByRecipient),
            Role::Originator => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialRegistration => "INITIAL_REGISTRATION",
            Self::AddedToDelivery => "ADDED_TO_DELIVERY",
            Self::TransferInitiated => "TRANSFER_INITIATED",
            Self::ReceivedByCarrier => "RECEIVED_BY_CARRIER",
            Self::ReceivedByRecipient => "RECEIVED_BY_RECIPIENT",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// AUDIT TRAIL
// =============================================================================

/// One entry in a unit's append-only history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustodyEvent {
    /// Ledger-assigned logical timestamp of the transaction.
    pub timestamp: String,
    pub actor_org: String,
    pub actor_identity: String,
    pub action: EventAction,
    #[serde(deserialize_with = "Option::deserialize")]
    pub previous_owner_org: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub previous_owner_identity: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub new_owner_org: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub new_owner_identity: Option<String>,
}

impl CustodyEvent {
    /// Create an event with no ownership fields set.
    pub fn new(
        timestamp: impl Into<String>,
        actor_org: impl Into<String>,
        actor_identity: impl Into<String>,
        action: EventAction,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            actor_org: actor_org.into(),
            actor_identity: actor_identity.into(),
            action,
            previous_owner_org: None,
            previous_owner_identity: None,
            new_owner_org: None,
            new_owner_identity: None,
        }
    }

    /// Builder method to set the previous owner.
    pub fn with_previous_owner(mut self, org: impl Into<String>, identity: impl Into<String>) -> Self {
        self.previous_owner_org = Some(org.into());
        self.previous_owner_identity = Some(identity.into());
        self
    }

    /// Builder method to set the new owner.
    pub fn with_new_owner(mut self, org: impl Into<String>, identity: impl Into<String>) -> Self {
        self.new_owner_org = Some(org.into());
        self.new_owner_identity = Some(identity.into());
        self
    }
}

// =============================================================================
// UNIT
// =============================================================================

/// A physical fertilizer batch tracked as its own ledger entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Unit {
    pub unit_id: String,
    pub product_type: String,
    /// Always positive.
    pub quantity: u64,
    pub current_owner_org: String,
    pub current_owner_identity: String,
    /// Set once when the unit joins a delivery, never changed afterwards.
    #[serde(deserialize_with = "Option::deserialize")]
    pub delivery_id: Option<String>,
    pub status: UnitStatus,
    /// Oldest first.
    pub history: Vec<CustodyEvent>,
}

impl Unit {
    /// The most recent event, if any.
    pub fn last_event(&self) -> Option<&CustodyEvent> {
        self.history.last()
    }

    pub fn is_owned_by(&self, org: &str) -> bool {
        self.current_owner_org == org
    }
}

// =============================================================================
// DELIVERY
// =============================================================================

/// A custody batch of units moving together through the role chain.
///
/// A delivery keeps no history of its own. Its audit trail is the union of
/// its members' histories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Delivery {
    pub delivery_id: String,
    pub originator_org: String,
    pub originator_identity: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub carrier_org: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub carrier_identity: Option<String>,
    pub recipient_org: String,
    /// Designated when the delivery is created or at the final hand-off.
    #[serde(deserialize_with = "Option::deserialize")]
    pub recipient_identity: Option<String>,
    /// Member unit keys in insertion order, no duplicates.
    pub unit_ids: Vec<String>,
    pub status: DeliveryStatus,
    pub created_at: String,
    pub last_updated_at: String,
}

impl Delivery {
    pub fn contains_unit(&self, unit_id: &str) -> bool {
        self.unit_ids.iter().any(|id| id == unit_id)
    }

    /// Organization recorded on this delivery for `role`.
    pub fn party_org(&self, role: Role) -> Option<&str> {
        match role {
            Role::Originator => Some(self.originator_org.as_str()),
            Role::Carrier => self.carrier_org.as_deref(),
            Role::Recipient => Some(self.recipient_org.as_str()),
        }
    }

    /// Identity recorded on this delivery for `role`.
    pub fn party_identity(&self, role: Role) -> Option<&str> {
        match role {
            Role::Originator => Some(self.originator_identity.as_str()),
            Role::Carrier => self.carrier_identity.as_deref(),
            Role::Recipient => self.recipient_identity.as_deref(),
        }
    }
}

// =============================================================================
// LEDGER RECORD
// =============================================================================

/// Tagged envelope for every value written under a ledger key.
///
/// Units and deliveries share one keyspace, so the tag is what tells them
/// apart on read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "docType", rename_all = "camelCase")]
pub enum LedgerRecord {
    Unit(Unit),
    Delivery(Delivery),
}

impl LedgerRecord {
    /// The ledger key this record is stored under.
    pub fn key(&self) -> &str {
        match self {
            Self::Unit(unit) => &unit.unit_id,
            Self::Delivery(delivery) => &delivery.delivery_id,
        }
    }
}

impl From<Unit> for LedgerRecord {
    fn from(unit: Unit) -> Self {
        Self::Unit(unit)
    }
}

impl From<Delivery> for LedgerRecord {
    fn from(delivery: Delivery) -> Self {
        Self::Delivery(delivery)
    }
}

// =============================================================================
// TESTS
// =============================================================================
