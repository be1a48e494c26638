//! # Role Chain
//!
//! Maps the custody roles onto organization ids.
//!
//! The engine never compares against hard-coded organizations. It receives a
//! [`RoleMap`] at construction and asks it which organization plays which
//! role. A map without a carrier describes the reduced two-role chain in
//! which the originator hands off straight to the recipient.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A position in the custody chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Originator,
    Carrier,
    Recipient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Originator => "originator",
            Self::Carrier => "carrier",
            Self::Recipient => "recipient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid role assignments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleMapError {
    #[error("No organization assigned to the {0} role")]
    EmptyOrg(Role),

    #[error("Organization {org} assigned to both {first} and {second}")]
    DuplicateOrg { org: String, first: Role, second: Role },
}

/// Role-to-organization assignment supplied to the custody engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    originator: String,
    carrier: Option<String>,
    recipient: String,
}

impl RoleMap {
    /// Full originator → carrier → recipient chain.
    pub fn three_role(
        originator: impl Into<String>,
        carrier: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            originator: originator.into(),
            carrier: Some(carrier.into()),
            recipient: recipient.into(),
        }
    }

    /// Reduced originator → recipient chain.
    pub fn two_role(originator: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            originator: originator.into(),
            carrier: None,
            recipient: recipient.into(),
        }
    }

    pub fn originator(&self) -> &str {
        &self.originator
    }

    pub fn carrier(&self) -> Option<&str> {
        self.carrier.as_deref()
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn has_carrier(&self) -> bool {
        self.carrier.is_some()
    }

    /// Organization assigned to `role`, if the chain has that role.
    pub fn org_for(&self, role: Role) -> Option<&str> {
        match role {
            Role::Originator => Some(&self.originator),
            Role::Carrier => self.carrier.as_deref(),
            Role::Recipient => Some(&self.recipient),
        }
    }

    /// Role played by `org`, if any.
    pub fn role_of(&self, org: &str) -> Option<Role> {
        self.roles()
            .into_iter()
            .find(|role| self.org_for(*role) == Some(org))
    }

    /// Roles present in this chain, in custody order.
    pub fn roles(&self) -> Vec<Role> {
        if self.has_carrier() {
            vec![Role::Originator, Role::Carrier, Role::Recipient]
        } else {
            vec![Role::Originator, Role::Recipient]
        }
    }

    /// Every role must have a non-empty organization and no organization may
    /// play two roles.
    pub fn validate(&self) -> Result<(), RoleMapError> {
        let assigned: Vec<(Role, &str)> = self
            .roles()
            .into_iter()
            .filter_map(|role| self.org_for(role).map(|org| (role, org)))
            .collect();

        for (role, org) in &assigned {
            if org.trim().is_empty() {
                return Err(RoleMapError::EmptyOrg(*role));
            }
        }

        for (i, (first, org)) in assigned.iter().enumerate() {
            if let Some((second, _)) = assigned[i + 1..].iter().find(|(_, other)| other == org) {
                return Err(RoleMapError::DuplicateOrg {
                    org: (*org).to_string(),
                    first: *first,
                    second: *second,
                });
            }
        }

        Ok(())
    }
}

impl Default for RoleMap {
    fn default() -> Self {
        Self::three_role("Org1", "Org2", "Org3")
    }
}
