//! # Engine Configuration

use shared_types::{RoleMap, RoleMapError};

/// Custody engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Which organization plays which custody role.
    pub roles: RoleMap,
    /// Audit the staged write set against the domain invariants before
    /// every commit.
    pub enforce_consistency_checks: bool,
    /// Upper bound on the member count of one delivery.
    pub max_units_per_delivery: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            roles: RoleMap::default(),
            enforce_consistency_checks: true,
            max_units_per_delivery: 1000,
        }
    }
}

impl EngineConfig {
    /// Builder method to set the role chain.
    pub fn with_roles(mut self, roles: RoleMap) -> Self {
        self.roles = roles;
        self
    }

    /// Builder method to toggle the pre-commit audit.
    pub fn with_consistency_checks(mut self, enabled: bool) -> Self {
        self.enforce_consistency_checks = enabled;
        self
    }

    /// Builder method to set the delivery size limit.
    pub fn with_max_units_per_delivery(mut self, max: usize) -> Self {
        self.max_units_per_delivery = max;
        self
    }

    pub fn validate(&self) -> Result<(), RoleMapError> {
        self.roles.validate()
    }
}
