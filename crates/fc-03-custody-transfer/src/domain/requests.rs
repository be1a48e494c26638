//! # Request Value Objects
//!
//! Caller-supplied fields for the creating operations, validated before the
//! ledger is touched.

use shared_types::CustodyError;
use std::collections::HashSet;

/// Fields of a unit being created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitSpec {
    pub unit_id: String,
    pub product_type: String,
    pub quantity: u64,
}

impl UnitSpec {
    pub fn new(unit_id: impl Into<String>, product_type: impl Into<String>, quantity: u64) -> Self {
        Self {
            unit_id: unit_id.into(),
            product_type: product_type.into(),
            quantity,
        }
    }

    pub fn validate(&self) -> Result<(), CustodyError> {
        require_non_empty("unitId", &self.unit_id)?;
        require_non_empty("productType", &self.product_type)?;
        if self.quantity == 0 {
            return Err(CustodyError::InvalidArgument(format!(
                "quantity of {} must be positive",
                self.unit_id
            )));
        }
        Ok(())
    }
}

/// Fields of a delivery being created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliverySpec {
    pub delivery_id: String,
    pub recipient_org: String,
    /// Designated recipient identity, if known at creation.
    pub recipient_identity: Option<String>,
}

impl DeliverySpec {
    pub fn new(delivery_id: impl Into<String>, recipient_org: impl Into<String>) -> Self {
        Self {
            delivery_id: delivery_id.into(),
            recipient_org: recipient_org.into(),
            recipient_identity: None,
        }
    }

    /// Builder method to designate the recipient identity up front.
    pub fn with_recipient_identity(mut self, identity: impl Into<String>) -> Self {
        self.recipient_identity = Some(identity.into());
        self
    }

    pub fn validate(&self) -> Result<(), CustodyError> {
        require_non_empty("deliveryId", &self.delivery_id)?;
        require_non_empty("recipientOrg", &self.recipient_org)?;
        if let Some(identity) = &self.recipient_identity {
            require_non_empty("recipientIdentity", identity)?;
        }
        Ok(())
    }
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), CustodyError> {
    if value.trim().is_empty() {
        return Err(CustodyError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Fail on the first id that appears twice.
pub fn reject_duplicates<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<(), CustodyError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CustodyError::InvalidArgument(format!(
                "id {id} appears more than once in the request"
            )));
        }
    }
    Ok(())
}
