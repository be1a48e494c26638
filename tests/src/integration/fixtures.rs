//! # Test Fixtures
//!
//! One ledger, one engine, and callers for each party of the chain.

use fc_01_ledger_access::InMemoryLedger;
use fc_02_entity_repository::{decode_record, EntityRepository};
use fc_03_custody_transfer::{
    check_delivery_consistency, ConsistencyViolation, CustodyEngine, DeliverySpec, EngineConfig,
    UnitSpec,
};
use fc_04_query_projection::QueryProjection;
use shared_types::{CustodyError, Delivery, Invocation, LedgerRecord, RoleMap, Unit};

pub const ORIGINATOR: &str = "Org1";
pub const CARRIER: &str = "Org2";
pub const RECIPIENT: &str = "Org3";
pub const OUTSIDER: &str = "Org9";

/// Identity each test organization signs with.
pub fn identity_of(org: &str) -> &'static str {
    match org {
        ORIGINATOR => "originator-1",
        CARRIER => "carrier-1",
        RECIPIENT => "recipient-1",
        _ => "intruder-1",
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// A ledger and the engine that writes to it.
pub struct CustodyNetwork {
    pub ledger: InMemoryLedger,
    pub engine: CustodyEngine,
}

impl CustodyNetwork {
    /// `Org1 -> Org2 -> Org3`.
    pub fn three_role() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// `Org1 -> Org3`, no carrier.
    pub fn two_role() -> Self {
        Self::with_config(
            EngineConfig::default().with_roles(RoleMap::two_role(ORIGINATOR, RECIPIENT)),
        )
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            ledger: InMemoryLedger::new(),
            engine: CustodyEngine::new(config),
        }
    }

    /// Open a transaction and return the caller context for `org`.
    pub fn as_org(&self, org: &str) -> Invocation {
        let stamp = self.ledger.begin_transaction();
        Invocation::new(org, identity_of(org), stamp.timestamp)
    }

    pub fn projection(&self) -> QueryProjection<'_, InMemoryLedger> {
        QueryProjection::new(&self.ledger)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    pub fn register(
        &self,
        org: &str,
        unit_id: &str,
        delivery: Option<(&str, &str)>,
    ) -> Result<Unit, CustodyError> {
        let ctx = self.as_org(org);
        self.engine.register_unit(
            &self.ledger,
            &ctx,
            UnitSpec::new(unit_id, "UREA", 50),
            delivery.map(|(id, recipient)| DeliverySpec::new(id, recipient)),
        )
    }

    pub fn initiate(
        &self,
        org: &str,
        delivery_id: &str,
        units: &[&str],
    ) -> Result<Delivery, CustodyError> {
        let ctx = self.as_org(org);
        self.engine.initiate_delivery(
            &self.ledger,
            &ctx,
            DeliverySpec::new(delivery_id, RECIPIENT),
            units.iter().map(|id| UnitSpec::new(*id, "NPK", 25)).collect(),
        )
    }

    pub fn augment(&self, org: &str, delivery_id: &str, unit_id: &str) -> Result<Unit, CustodyError> {
        let ctx = self.as_org(org);
        self.engine.augment_delivery(
            &self.ledger,
            &ctx,
            delivery_id,
            UnitSpec::new(unit_id, "DAP", 10),
        )
    }

    pub fn hand_off(
        &self,
        org: &str,
        delivery_id: &str,
        target_org: &str,
    ) -> Result<Delivery, CustodyError> {
        let ctx = self.as_org(org);
        self.engine.hand_off(
            &self.ledger,
            &ctx,
            delivery_id,
            target_org,
            identity_of(target_org),
        )
    }

    pub fn accept(
        &self,
        org: &str,
        delivery_id: &str,
        scanned: &[&str],
    ) -> Result<Delivery, CustodyError> {
        let ctx = self.as_org(org);
        self.engine.accept(&self.ledger, &ctx, delivery_id, &ids(scanned))
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Every record on the ledger, decoded.
    pub fn records(&self) -> Vec<LedgerRecord> {
        self.ledger
            .snapshot()
            .iter()
            .map(|(key, bytes)| decode_record(key, bytes).unwrap())
            .collect()
    }

    /// Check membership and status agreement of every delivery on the ledger.
    ///
    /// Members are found by scanning every unit for its delivery link, so a
    /// unit that points at a delivery without being listed is caught too.
    pub fn check_consistency(&self) -> Result<(), ConsistencyViolation> {
        let repo = EntityRepository::new(&self.ledger);
        let records = self.records();
        let units: Vec<&Unit> = records
            .iter()
            .filter_map(|r| match r {
                LedgerRecord::Unit(u) => Some(u),
                LedgerRecord::Delivery(_) => None,
            })
            .collect();

        for record in &records {
            if let LedgerRecord::Delivery(delivery) = record {
                let linked: Vec<Unit> = units
                    .iter()
                    .filter(|u| u.delivery_id.as_deref() == Some(delivery.delivery_id.as_str()))
                    .map(|u| (*u).clone())
                    .collect();
                check_delivery_consistency(delivery, &linked)?;
                assert_eq!(repo.get_members(delivery).unwrap(), linked_in_order(delivery, &linked));
            }
        }
        Ok(())
    }
}

fn linked_in_order(delivery: &Delivery, linked: &[Unit]) -> Vec<Unit> {
    delivery
        .unit_ids
        .iter()
        .filter_map(|id| linked.iter().find(|u| &u.unit_id == id).cloned())
        .collect()
}

impl CustodyNetwork {
    /// Decoded unit, panicking if absent.
    pub fn unit(&self, unit_id: &str) -> Unit {
        self.projection().read_unit(unit_id).unwrap()
    }

    /// Decoded delivery, panicking if absent.
    pub fn delivery(&self, delivery_id: &str) -> Delivery {
        self.projection().read_delivery(delivery_id).unwrap()
    }
}
