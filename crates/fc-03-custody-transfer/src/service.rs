//! # Custody Transfer Service
//!
//! The custody engine. Validates and applies the lifecycle operations against
//! a ledger handle passed in per call.
//!
//! ## Operation Shape
//!
//! Every operation follows the same order:
//!
//! 1. Validate request fields (`InvalidArgument`).
//! 2. Read the records it needs through the [`EntityRepository`].
//! 3. Check status, permission and ownership preconditions.
//! 4. Stage new values in a [`WriteSet`] and audit them.
//! 5. Commit, units first and the delivery last.
//!
//! Nothing is written before step 5, so a rejected operation leaves every
//! ledger value byte-identical.

use crate::config::EngineConfig;
use crate::domain::{
    accept_rule, check_delivery_consistency, check_delivery_link_preserved,
    check_single_event_appended, hand_off_rule, reject_duplicates, require_non_empty,
    DeliverySpec, UnitSpec,
};
use fc_01_ledger_access::LedgerAccessor;
use fc_02_entity_repository::{EntityRepository, WriteSet};
use parking_lot::RwLock;
use shared_types::{
    CustodyError, CustodyEvent, Delivery, DeliveryStatus, EventAction, IdentityContext,
    LedgerRecord, Role, RoleMap, Unit, UnitStatus,
};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

const OP_REGISTER: &str = "register unit";
const OP_INITIATE: &str = "initiate delivery";
const OP_AUGMENT: &str = "augment delivery";
const OP_HAND_OFF: &str = "hand off delivery";
const OP_ACCEPT: &str = "accept delivery";

/// Counters for the custody engine.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EngineStats {
    /// Units created by any path.
    pub units_created: u64,
    /// Deliveries created.
    pub deliveries_initiated: u64,
    /// Successful hand-offs.
    pub hand_offs: u64,
    /// Successful acceptances.
    pub acceptances: u64,
    /// Operations rejected with an error.
    pub rejected: u64,
}

/// The custody transfer engine.
///
/// Holds only its configuration and counters. The ledger handle and caller
/// identity are passed to each operation.
pub struct CustodyEngine {
    config: EngineConfig,
    stats: RwLock<EngineStats>,
}

impl CustodyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stats: RwLock::new(EngineStats::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roles(&self) -> &RoleMap {
        &self.config.roles
    }

    pub fn stats(&self) -> EngineStats {
        self.stats.read().clone()
    }

    // =========================================================================
    // REGISTER
    // =========================================================================

    /// Register a new unit held by the originator.
    ///
    /// With `delivery`, the unit also joins that delivery: a new delivery is
    /// created if the id is free, and an existing INITIATED delivery is
    /// extended otherwise.
    #[instrument(skip(self, ledger, ctx, unit, delivery), fields(unit_id = %unit.unit_id, org = %ctx.caller_org()))]
    pub fn register_unit<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        unit: UnitSpec,
        delivery: Option<DeliverySpec>,
    ) -> Result<Unit, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let result = self.try_register_unit(ledger, ctx, unit, delivery);
        self.record_outcome(OP_REGISTER, &result, |stats, _| stats.units_created += 1);
        result
    }

    fn try_register_unit<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        unit: UnitSpec,
        delivery: Option<DeliverySpec>,
    ) -> Result<Unit, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        unit.validate()?;
        if let Some(spec) = &delivery {
            spec.validate()?;
            reject_duplicates([unit.unit_id.as_str(), spec.delivery_id.as_str()])?;
        }
        self.require_role(ctx, Role::Originator, OP_REGISTER)?;

        let repo = EntityRepository::new(ledger);
        repo.ensure_absent(&unit.unit_id)?;

        let Some(spec) = delivery else {
            let created = new_unit(ctx, &unit, None, EventAction::InitialRegistration);
            let mut write_set = WriteSet::new();
            write_set.stage_unit(created.clone());
            repo.commit(write_set)?;
            info!("Unit registered");
            return Ok(created);
        };

        match repo.get_record(&spec.delivery_id)? {
            None => {
                let (_, mut units) = self.create_delivery(&repo, ctx, &spec, &[unit])?;
                units.pop().ok_or_else(|| CustodyError::not_found(&spec.delivery_id))
            }
            Some(LedgerRecord::Delivery(existing)) => {
                if existing.recipient_org != spec.recipient_org {
                    return Err(CustodyError::InvalidArgument(format!(
                        "delivery {} is bound for {}, not {}",
                        existing.delivery_id, existing.recipient_org, spec.recipient_org
                    )));
                }
                self.join_delivery(
                    &repo,
                    ctx,
                    existing,
                    &unit,
                    EventAction::InitialRegistration,
                    OP_REGISTER,
                )
            }
            Some(LedgerRecord::Unit(_)) => Err(CustodyError::already_exists(&spec.delivery_id)),
        }
    }

    // =========================================================================
    // INITIATE
    // =========================================================================

    /// Create a delivery in INITIATED together with its first member units.
    #[instrument(skip(self, ledger, ctx, delivery, units), fields(delivery_id = %delivery.delivery_id, org = %ctx.caller_org()))]
    pub fn initiate_delivery<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery: DeliverySpec,
        units: Vec<UnitSpec>,
    ) -> Result<Delivery, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let result = self.try_initiate_delivery(ledger, ctx, delivery, units);
        self.record_outcome(OP_INITIATE, &result, |stats, delivery| {
            stats.units_created += delivery.unit_ids.len() as u64;
        });
        result
    }

    fn try_initiate_delivery<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery: DeliverySpec,
        units: Vec<UnitSpec>,
    ) -> Result<Delivery, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        delivery.validate()?;
        if units.is_empty() {
            return Err(CustodyError::InvalidArgument(format!(
                "delivery {} needs at least one unit",
                delivery.delivery_id
            )));
        }
        for unit in &units {
            unit.validate()?;
        }
        reject_duplicates(
            units
                .iter()
                .map(|u| u.unit_id.as_str())
                .chain([delivery.delivery_id.as_str()]),
        )?;
        self.require_role(ctx, Role::Originator, OP_INITIATE)?;

        let repo = EntityRepository::new(ledger);
        let (created, _) = self.create_delivery(&repo, ctx, &delivery, &units)?;
        Ok(created)
    }

    // =========================================================================
    // AUGMENT
    // =========================================================================

    /// Add a new unit to a delivery that has not left the originator yet.
    #[instrument(skip(self, ledger, ctx, unit), fields(unit_id = %unit.unit_id, org = %ctx.caller_org()))]
    pub fn augment_delivery<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery_id: &str,
        unit: UnitSpec,
    ) -> Result<Unit, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let result = self.try_augment_delivery(ledger, ctx, delivery_id, unit);
        self.record_outcome(OP_AUGMENT, &result, |stats, _| stats.units_created += 1);
        result
    }

    fn try_augment_delivery<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery_id: &str,
        unit: UnitSpec,
    ) -> Result<Unit, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        require_non_empty("deliveryId", delivery_id)?;
        unit.validate()?;
        reject_duplicates([unit.unit_id.as_str(), delivery_id])?;

        let repo = EntityRepository::new(ledger);
        let delivery = repo.get_delivery(delivery_id)?;
        self.join_delivery(
            &repo,
            ctx,
            delivery,
            &unit,
            EventAction::AddedToDelivery,
            OP_AUGMENT,
        )
    }

    // =========================================================================
    // HAND OFF
    // =========================================================================

    /// Mark every member of a delivery as in transit to the next party.
    ///
    /// Ownership does not move until the target accepts.
    #[instrument(skip(self, ledger, ctx), fields(org = %ctx.caller_org()))]
    pub fn hand_off<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery_id: &str,
        target_org: &str,
        target_identity: &str,
    ) -> Result<Delivery, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let result = self.try_hand_off(ledger, ctx, delivery_id, target_org, target_identity);
        self.record_outcome(OP_HAND_OFF, &result, |stats, _| stats.hand_offs += 1);
        result
    }

    fn try_hand_off<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery_id: &str,
        target_org: &str,
        target_identity: &str,
    ) -> Result<Delivery, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        require_non_empty("deliveryId", delivery_id)?;
        require_non_empty("targetOrg", target_org)?;
        require_non_empty("targetIdentity", target_identity)?;

        let repo = EntityRepository::new(ledger);
        let mut delivery = repo.get_delivery(delivery_id)?;
        let rule = hand_off_rule(&self.config.roles, delivery.status)
            .ok_or_else(|| invalid_state(&delivery, OP_HAND_OFF))?;
        require_party(&delivery, rule.actor, ctx, OP_HAND_OFF)?;

        let expected_target = match rule.target {
            Role::Recipient => Some(delivery.recipient_org.as_str()),
            role => self.config.roles.org_for(role),
        };
        if expected_target != Some(target_org) {
            return Err(CustodyError::Unauthorized {
                org: ctx.caller_org().to_string(),
                operation: OP_HAND_OFF,
                reason: format!("{target_org} is not the {} of {delivery_id}", rule.target),
            });
        }
        if rule.target == Role::Recipient {
            if let Some(designated) = &delivery.recipient_identity {
                if designated != target_identity {
                    return Err(CustodyError::RecipientMismatch {
                        delivery_id: delivery_id.to_string(),
                        expected: designated.clone(),
                        actual: target_identity.to_string(),
                    });
                }
            }
        }

        let members = repo.get_members(&delivery)?;
        let held_status = delivery.status.member_status();
        for unit in &members {
            if !unit.is_owned_by(ctx.caller_org()) {
                return Err(CustodyError::OwnershipMismatch {
                    unit_id: unit.unit_id.clone(),
                    expected_org: ctx.caller_org().to_string(),
                    actual_org: unit.current_owner_org.clone(),
                });
            }
            if unit.status != held_status {
                return Err(unit_invalid_state(unit, OP_HAND_OFF));
            }
        }

        let staged: Vec<Unit> = members
            .iter()
            .cloned()
            .map(|mut unit| {
                let event = event(ctx, EventAction::TransferInitiated)
                    .with_previous_owner(&unit.current_owner_org, &unit.current_owner_identity)
                    .with_new_owner(target_org, target_identity);
                unit.status = UnitStatus::InDelivery;
                unit.history.push(event);
                unit
            })
            .collect();

        match rule.target {
            Role::Carrier => {
                delivery.carrier_org = Some(target_org.to_string());
                delivery.carrier_identity = Some(target_identity.to_string());
            }
            _ => delivery.recipient_identity = Some(target_identity.to_string()),
        }
        delivery.status = rule.next;
        delivery.last_updated_at = ctx.logical_timestamp().to_string();

        self.audit(&delivery, &members, &staged, OP_HAND_OFF)?;
        self.commit(&repo, staged, delivery.clone())?;

        info!(
            delivery_id,
            from = %rule.from,
            to = %rule.next,
            target_org,
            "Delivery handed off"
        );
        Ok(delivery)
    }

    // =========================================================================
    // ACCEPT
    // =========================================================================

    /// Take custody of every member of a delivery.
    ///
    /// `scanned` must name exactly the delivery's members, each once. Order
    /// does not matter.
    #[instrument(skip(self, ledger, ctx, scanned), fields(org = %ctx.caller_org(), scanned = scanned.len()))]
    pub fn accept<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery_id: &str,
        scanned: &[String],
    ) -> Result<Delivery, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let result = self.try_accept(ledger, ctx, delivery_id, scanned);
        self.record_outcome(OP_ACCEPT, &result, |stats, _| stats.acceptances += 1);
        result
    }

    fn try_accept<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        delivery_id: &str,
        scanned: &[String],
    ) -> Result<Delivery, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        require_non_empty("deliveryId", delivery_id)?;

        let repo = EntityRepository::new(ledger);
        let mut delivery = repo.get_delivery(delivery_id)?;
        let rule = accept_rule(&self.config.roles, delivery.status)
            .ok_or_else(|| invalid_state(&delivery, OP_ACCEPT))?;
        require_party(&delivery, rule.acceptor, ctx, OP_ACCEPT)?;

        if let Some(designated) = delivery.party_identity(rule.acceptor) {
            if designated != ctx.caller_identity() {
                return Err(CustodyError::RecipientMismatch {
                    delivery_id: delivery_id.to_string(),
                    expected: designated.to_string(),
                    actual: ctx.caller_identity().to_string(),
                });
            }
        }

        let mut scanned_set: BTreeSet<&str> = BTreeSet::new();
        let mut repeated: BTreeSet<&str> = BTreeSet::new();
        for id in scanned {
            if !scanned_set.insert(id.as_str()) {
                repeated.insert(id.as_str());
            }
        }
        let missing: Vec<String> = delivery
            .unit_ids
            .iter()
            .filter(|id| !scanned_set.contains(id.as_str()))
            .cloned()
            .collect();
        // Ids outside the delivery come first, then repeated scans of members.
        let unexpected: Vec<String> = scanned_set
            .iter()
            .filter(|id| !delivery.contains_unit(id))
            .chain(repeated.iter().filter(|id| delivery.contains_unit(id)))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty()
            || !unexpected.is_empty()
            || scanned.len() != delivery.unit_ids.len()
        {
            return Err(CustodyError::ContentMismatch {
                delivery_id: delivery_id.to_string(),
                missing,
                unexpected,
            });
        }

        let members = repo.get_members(&delivery)?;
        let previous_org = delivery
            .party_org(rule.previous_owner)
            .unwrap_or_default()
            .to_string();
        for unit in &members {
            if !unit.is_owned_by(&previous_org) {
                return Err(CustodyError::OwnershipMismatch {
                    unit_id: unit.unit_id.clone(),
                    expected_org: previous_org.clone(),
                    actual_org: unit.current_owner_org.clone(),
                });
            }
            if unit.status != UnitStatus::InDelivery {
                return Err(unit_invalid_state(unit, OP_ACCEPT));
            }
        }

        let received_status = rule.next.member_status();
        let staged: Vec<Unit> = members
            .iter()
            .cloned()
            .map(|mut unit| {
                let event = event(ctx, rule.action)
                    .with_previous_owner(&unit.current_owner_org, &unit.current_owner_identity)
                    .with_new_owner(ctx.caller_org(), ctx.caller_identity());
                unit.current_owner_org = ctx.caller_org().to_string();
                unit.current_owner_identity = ctx.caller_identity().to_string();
                unit.status = received_status;
                unit.history.push(event);
                unit
            })
            .collect();

        delivery.status = rule.next;
        delivery.last_updated_at = ctx.logical_timestamp().to_string();

        self.audit(&delivery, &members, &staged, OP_ACCEPT)?;
        self.commit(&repo, staged, delivery.clone())?;

        info!(
            delivery_id,
            from = %rule.from,
            to = %rule.next,
            units = delivery.unit_ids.len(),
            "Delivery accepted"
        );
        Ok(delivery)
    }

    // =========================================================================
    // SHARED STEPS
    // =========================================================================

    /// Build and commit a new delivery with freshly created member units.
    fn create_delivery<L, C>(
        &self,
        repo: &EntityRepository<'_, L>,
        ctx: &C,
        spec: &DeliverySpec,
        units: &[UnitSpec],
    ) -> Result<(Delivery, Vec<Unit>), CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        if spec.recipient_org != self.config.roles.recipient() {
            return Err(CustodyError::InvalidArgument(format!(
                "{} does not play the recipient role",
                spec.recipient_org
            )));
        }
        if units.len() > self.config.max_units_per_delivery {
            return Err(CustodyError::InvalidArgument(format!(
                "delivery {} would hold {} units, limit is {}",
                spec.delivery_id,
                units.len(),
                self.config.max_units_per_delivery
            )));
        }

        repo.ensure_absent(&spec.delivery_id)?;
        for unit in units {
            repo.ensure_absent(&unit.unit_id)?;
        }

        let created: Vec<Unit> = units
            .iter()
            .map(|unit| {
                new_unit(
                    ctx,
                    unit,
                    Some(&spec.delivery_id),
                    EventAction::InitialRegistration,
                )
            })
            .collect();

        let now = ctx.logical_timestamp().to_string();
        let delivery = Delivery {
            delivery_id: spec.delivery_id.clone(),
            originator_org: ctx.caller_org().to_string(),
            originator_identity: ctx.caller_identity().to_string(),
            carrier_org: None,
            carrier_identity: None,
            recipient_org: spec.recipient_org.clone(),
            recipient_identity: spec.recipient_identity.clone(),
            unit_ids: created.iter().map(|u| u.unit_id.clone()).collect(),
            status: DeliveryStatus::Initiated,
            created_at: now.clone(),
            last_updated_at: now,
        };

        self.audit(&delivery, &[], &created, OP_INITIATE)?;
        self.commit(repo, created.clone(), delivery.clone())?;

        self.stats.write().deliveries_initiated += 1;
        info!(
            delivery_id = %delivery.delivery_id,
            units = created.len(),
            recipient_org = %delivery.recipient_org,
            "Delivery initiated"
        );
        Ok((delivery, created))
    }

    /// Add one new unit to an existing INITIATED delivery.
    ///
    /// Status is checked before the caller, so a delivery that has moved on
    /// rejects everyone with `InvalidState`.
    fn join_delivery<L, C>(
        &self,
        repo: &EntityRepository<'_, L>,
        ctx: &C,
        mut delivery: Delivery,
        unit: &UnitSpec,
        action: EventAction,
        operation: &'static str,
    ) -> Result<Unit, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        if delivery.status != DeliveryStatus::Initiated {
            return Err(invalid_state(&delivery, operation));
        }
        require_party(&delivery, Role::Originator, ctx, operation)?;
        if delivery.unit_ids.len() >= self.config.max_units_per_delivery {
            return Err(CustodyError::InvalidArgument(format!(
                "delivery {} already holds {} units",
                delivery.delivery_id,
                delivery.unit_ids.len()
            )));
        }
        repo.ensure_absent(&unit.unit_id)?;

        let created = new_unit(ctx, unit, Some(&delivery.delivery_id), action);
        let mut members = if self.config.enforce_consistency_checks {
            repo.get_members(&delivery)?
        } else {
            Vec::new()
        };

        delivery.unit_ids.push(created.unit_id.clone());
        delivery.last_updated_at = ctx.logical_timestamp().to_string();

        if self.config.enforce_consistency_checks {
            members.push(created.clone());
            self.audit(&delivery, &[], &members, operation)?;
        }
        self.commit(repo, vec![created.clone()], delivery.clone())?;

        info!(
            delivery_id = %delivery.delivery_id,
            members = delivery.unit_ids.len(),
            action = %action,
            "Unit joined delivery"
        );
        Ok(created)
    }

    fn require_role<C: IdentityContext + ?Sized>(
        &self,
        ctx: &C,
        role: Role,
        operation: &'static str,
    ) -> Result<(), CustodyError> {
        match self.config.roles.org_for(role) {
            Some(org) if org == ctx.caller_org() => Ok(()),
            _ => Err(CustodyError::Unauthorized {
                org: ctx.caller_org().to_string(),
                operation,
                reason: format!("only the {role} may do this"),
            }),
        }
    }

    /// Check the staged state before commit.
    ///
    /// `previous` holds the stored versions of the first `previous.len()`
    /// entries of `members`, in the same order.
    fn audit(
        &self,
        delivery: &Delivery,
        previous: &[Unit],
        members: &[Unit],
        operation: &'static str,
    ) -> Result<(), CustodyError> {
        if !self.config.enforce_consistency_checks {
            return Ok(());
        }

        let violation = check_delivery_consistency(delivery, members)
            .err()
            .map(|violation| violation.to_string())
            .or_else(|| {
                previous
                    .iter()
                    .zip(members)
                    .find(|(before, after)| {
                        !check_single_event_appended(before, after)
                            || !check_delivery_link_preserved(before, after)
                    })
                    .map(|(_, after)| format!("history of {} is not append-only", after.unit_id))
            });

        match violation {
            Some(reason) => {
                warn!(
                    delivery_id = %delivery.delivery_id,
                    %reason,
                    "Consistency audit failed"
                );
                Err(invalid_state(delivery, operation))
            }
            None => Ok(()),
        }
    }

    fn commit<L: LedgerAccessor + ?Sized>(
        &self,
        repo: &EntityRepository<'_, L>,
        units: Vec<Unit>,
        delivery: Delivery,
    ) -> Result<(), CustodyError> {
        let mut write_set = WriteSet::new();
        for unit in units {
            write_set.stage_unit(unit);
        }
        write_set.stage_delivery(delivery);
        let written = repo.commit(write_set)?;
        debug!(written, "Custody write set committed");
        Ok(())
    }

    fn record_outcome<T>(
        &self,
        operation: &'static str,
        result: &Result<T, CustodyError>,
        on_success: impl FnOnce(&mut EngineStats, &T),
    ) {
        let mut stats = self.stats.write();
        match result {
            Ok(value) => on_success(&mut stats, value),
            Err(err) => {
                stats.rejected += 1;
                warn!(operation, code = ?err.code(), error = %err, "Custody operation rejected");
            }
        }
    }
}

impl Default for CustodyEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn event<C: IdentityContext + ?Sized>(ctx: &C, action: EventAction) -> CustodyEvent {
    CustodyEvent::new(
        ctx.logical_timestamp(),
        ctx.caller_org(),
        ctx.caller_identity(),
        action,
    )
}

fn new_unit<C: IdentityContext + ?Sized>(
    ctx: &C,
    spec: &UnitSpec,
    delivery_id: Option<&str>,
    action: EventAction,
) -> Unit {
    Unit {
        unit_id: spec.unit_id.clone(),
        product_type: spec.product_type.clone(),
        quantity: spec.quantity,
        current_owner_org: ctx.caller_org().to_string(),
        current_owner_identity: ctx.caller_identity().to_string(),
        delivery_id: delivery_id.map(str::to_string),
        status: UnitStatus::Registered,
        history: vec![event(ctx, action).with_new_owner(ctx.caller_org(), ctx.caller_identity())],
    }
}

/// The caller must be the organization recorded on `delivery` for `role`.
fn require_party<C: IdentityContext + ?Sized>(
    delivery: &Delivery,
    role: Role,
    ctx: &C,
    operation: &'static str,
) -> Result<(), CustodyError> {
    match delivery.party_org(role) {
        Some(org) if org == ctx.caller_org() => Ok(()),
        recorded => Err(CustodyError::Unauthorized {
            org: ctx.caller_org().to_string(),
            operation,
            reason: match recorded {
                Some(org) => format!("the {role} of {} is {org}", delivery.delivery_id),
                None => format!("{} has no {role} assigned", delivery.delivery_id),
            },
        }),
    }
}

fn invalid_state(delivery: &Delivery, operation: &'static str) -> CustodyError {
    CustodyError::InvalidState {
        key: delivery.delivery_id.clone(),
        status: delivery.status.to_string(),
        operation,
    }
}

fn unit_invalid_state(unit: &Unit, operation: &'static str) -> CustodyError {
    CustodyError::InvalidState {
        key: unit.unit_id.clone(),
        status: unit.status.to_string(),
        operation,
    }
}

// =============================================================================
// TESTS
// =============================================================================
