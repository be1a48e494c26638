//! # Gateway Dispatch
//!
//! Maps a function name and a list of string arguments onto the custody
//! engine and the query projection. Every successful call returns the
//! canonical JSON of its result. Every failure is a [`CustodyError`].
//!
//! ## Functions
//!
//! | Function | Arguments | Returns |
//! |----------|-----------|---------|
//! | `RegisterUnit` | `unitId, productType, quantity [, deliveryId, recipientOrg [, recipientIdentity]]` | unit |
//! | `InitiateDelivery` | `deliveryId, recipientOrg, (unitId, productType, quantity)*` | delivery |
//! | `AddUnitToDelivery` | `deliveryId, unitId, productType, quantity` | unit |
//! | `HandOffDelivery` | `deliveryId, targetOrg, targetIdentity` | delivery |
//! | `AcceptDelivery` | `deliveryId, scannedUnitId*` | delivery |
//! | `ReadUnit` / `ReadDelivery` | `id` | unit / delivery |
//! | `GetUnitHistory` | `key` | history entries, oldest first |
//! | `QueryRecords` | `selector` | query matches |
//! | `QueryUnitsByOwner` | `org` | query matches |
//! | `QueryDeliveriesByStatus` | `status` | query matches |
//! | `QueryUnitsByDelivery` | `deliveryId` | query matches |

use fc_01_ledger_access::LedgerAccessor;
use fc_02_entity_repository::encode;
use fc_03_custody_transfer::{CustodyEngine, DeliverySpec, UnitSpec};
use fc_04_query_projection::{
    deliveries_by_status, units_by_delivery, units_by_owner, HistoryEntry, QueryProjection,
};
use serde::Serialize;
use shared_types::{CustodyError, DeliveryStatus, IdentityContext};
use std::fmt;
use tracing::{debug, instrument};

// =============================================================================
// FUNCTION NAMES
// =============================================================================

/// Operations reachable through the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GatewayFunction {
    RegisterUnit,
    InitiateDelivery,
    AddUnitToDelivery,
    HandOffDelivery,
    AcceptDelivery,
    ReadUnit,
    ReadDelivery,
    GetUnitHistory,
    QueryRecords,
    QueryUnitsByOwner,
    QueryDeliveriesByStatus,
    QueryUnitsByDelivery,
}

impl GatewayFunction {
    pub const ALL: [GatewayFunction; 12] = [
        Self::RegisterUnit,
        Self::InitiateDelivery,
        Self::AddUnitToDelivery,
        Self::HandOffDelivery,
        Self::AcceptDelivery,
        Self::ReadUnit,
        Self::ReadDelivery,
        Self::GetUnitHistory,
        Self::QueryRecords,
        Self::QueryUnitsByOwner,
        Self::QueryDeliveriesByStatus,
        Self::QueryUnitsByDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterUnit => "RegisterUnit",
            Self::InitiateDelivery => "InitiateDelivery",
            Self::AddUnitToDelivery => "AddUnitToDelivery",
            Self::HandOffDelivery => "HandOffDelivery",
            Self::AcceptDelivery => "AcceptDelivery",
            Self::ReadUnit => "ReadUnit",
            Self::ReadDelivery => "ReadDelivery",
            Self::GetUnitHistory => "GetUnitHistory",
            Self::QueryRecords => "QueryRecords",
            Self::QueryUnitsByOwner => "QueryUnitsByOwner",
            Self::QueryDeliveriesByStatus => "QueryDeliveriesByStatus",
            Self::QueryUnitsByDelivery => "QueryUnitsByDelivery",
        }
    }

    /// Look up a function by its exact name.
    pub fn parse(name: &str) -> Result<Self, CustodyError> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| CustodyError::InvalidArgument(format!("unknown function {name:?}")))
    }
}

impl fmt::Display for GatewayFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Function-name front door to one custody engine.
pub struct Gateway {
    engine: CustodyEngine,
}

impl Gateway {
    pub fn new(engine: CustodyEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &CustodyEngine {
        &self.engine
    }

    /// Run `function` with `args` for the caller in `ctx`.
    #[instrument(skip(self, ledger, ctx, args), fields(org = %ctx.caller_org(), args = args.len()))]
    pub fn invoke<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let function = GatewayFunction::parse(function)?;
        let result = self.dispatch(ledger, ctx, function, args);
        match &result {
            Ok(bytes) => debug!(%function, bytes = bytes.len(), "Invocation succeeded"),
            Err(err) => debug!(%function, code = ?err.code(), "Invocation failed"),
        }
        result
    }

    fn dispatch<L, C>(
        &self,
        ledger: &L,
        ctx: &C,
        function: GatewayFunction,
        args: &[String],
    ) -> Result<Vec<u8>, CustodyError>
    where
        L: LedgerAccessor + ?Sized,
        C: IdentityContext + ?Sized,
    {
        let projection = QueryProjection::new(ledger);
        match function {
            GatewayFunction::RegisterUnit => {
                expect_arity(function, args, &[3, 5, 6])?;
                let unit = unit_spec(&args[0], &args[1], &args[2])?;
                let delivery = match args.len() {
                    3 => None,
                    5 => Some(DeliverySpec::new(&args[3], &args[4])),
                    _ => Some(DeliverySpec::new(&args[3], &args[4]).with_recipient_identity(&args[5])),
                };
                respond(function, &self.engine.register_unit(ledger, ctx, unit, delivery)?)
            }
            GatewayFunction::InitiateDelivery => {
                if args.len() < 2 || (args.len() - 2) % 3 != 0 {
                    return Err(arity_error(
                        function,
                        args.len(),
                        "deliveryId, recipientOrg and (unitId, productType, quantity) triples",
                    ));
                }
                let units = args[2..]
                    .chunks_exact(3)
                    .map(|triple| unit_spec(&triple[0], &triple[1], &triple[2]))
                    .collect::<Result<Vec<_>, _>>()?;
                let delivery = DeliverySpec::new(&args[0], &args[1]);
                respond(function, &self.engine.initiate_delivery(ledger, ctx, delivery, units)?)
            }
            GatewayFunction::AddUnitToDelivery => {
                expect_arity(function, args, &[4])?;
                let unit = unit_spec(&args[1], &args[2], &args[3])?;
                respond(function, &self.engine.augment_delivery(ledger, ctx, &args[0], unit)?)
            }
            GatewayFunction::HandOffDelivery => {
                expect_arity(function, args, &[3])?;
                respond(
                    function,
                    &self.engine.hand_off(ledger, ctx, &args[0], &args[1], &args[2])?,
                )
            }
            GatewayFunction::AcceptDelivery => {
                let Some((delivery_id, scanned)) = args.split_first() else {
                    return Err(arity_error(function, 0, "deliveryId and scanned unit ids"));
                };
                respond(function, &self.engine.accept(ledger, ctx, delivery_id, scanned)?)
            }
            GatewayFunction::ReadUnit => {
                expect_arity(function, args, &[1])?;
                respond(function, &projection.read_unit(&args[0])?)
            }
            GatewayFunction::ReadDelivery => {
                expect_arity(function, args, &[1])?;
                respond(function, &projection.read_delivery(&args[0])?)
            }
            GatewayFunction::GetUnitHistory => {
                expect_arity(function, args, &[1])?;
                let entries = projection
                    .history(&args[0])?
                    .collect::<Result<Vec<HistoryEntry>, _>>()?;
                respond(function, &entries)
            }
            GatewayFunction::QueryRecords => {
                expect_arity(function, args, &[1])?;
                respond(function, &projection.query(&args[0])?)
            }
            GatewayFunction::QueryUnitsByOwner => {
                expect_arity(function, args, &[1])?;
                respond(function, &projection.query(&units_by_owner(&args[0]))?)
            }
            GatewayFunction::QueryDeliveriesByStatus => {
                expect_arity(function, args, &[1])?;
                let status = DeliveryStatus::parse(&args[0]).ok_or_else(|| {
                    CustodyError::InvalidArgument(format!("unknown delivery status {:?}", args[0]))
                })?;
                respond(function, &projection.query(&deliveries_by_status(status))?)
            }
            GatewayFunction::QueryUnitsByDelivery => {
                expect_arity(function, args, &[1])?;
                respond(function, &projection.query(&units_by_delivery(&args[0]))?)
            }
        }
    }
}

// =============================================================================
// ARGUMENT HELPERS
// =============================================================================

fn respond<T: Serialize>(function: GatewayFunction, value: &T) -> Result<Vec<u8>, CustodyError> {
    encode(function.as_str(), value)
}

fn expect_arity(
    function: GatewayFunction,
    args: &[String],
    allowed: &[usize],
) -> Result<(), CustodyError> {
    if allowed.contains(&args.len()) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(arity_error(function, args.len(), &expected))
}

fn arity_error(function: GatewayFunction, got: usize, expected: &str) -> CustodyError {
    CustodyError::InvalidArgument(format!(
        "{function} takes {expected} arguments, got {got}"
    ))
}

fn unit_spec(unit_id: &str, product_type: &str, quantity: &str) -> Result<UnitSpec, CustodyError> {
    Ok(UnitSpec::new(unit_id, product_type, parse_quantity(quantity)?))
}

fn parse_quantity(value: &str) -> Result<u64, CustodyError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| CustodyError::InvalidArgument(format!("quantity {value:?} is not a whole number: {e}")))
}

// =============================================================================
// TESTS
// =============================================================================
