//! # Random Operation Sequences
//!
//! Arbitrary interleavings of every mutating operation, from every
//! organization, against a small pool of ids. After each step:
//!
//! - a rejected call left the ledger digest unchanged
//! - every delivery agrees with its members on membership and status
//! - every unit's history only ever grew by exactly one event per write

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_03_custody_transfer::check_single_event_appended;
    use proptest::prelude::*;
    use shared_types::{DeliveryStatus, LedgerRecord, Unit, UnitStatus};
    use std::collections::BTreeMap;

    const ORGS: [&str; 4] = [ORIGINATOR, CARRIER, RECIPIENT, OUTSIDER];
    const UNITS: [&str; 5] = ["F1", "F2", "F3", "F4", "F5"];
    const DELIVERIES: [&str; 2] = ["D1", "D2"];

    #[derive(Clone, Debug)]
    enum Op {
        Register { org: usize, unit: usize, delivery: Option<usize> },
        Initiate { org: usize, delivery: usize, first: usize, count: usize },
        Augment { org: usize, delivery: usize, unit: usize },
        HandOff { org: usize, delivery: usize, target: usize },
        Accept { org: usize, delivery: usize, scan: Scan },
    }

    /// How the acceptor's scan relates to the real member list.
    #[derive(Clone, Copy, Debug)]
    enum Scan {
        Exact,
        Reversed,
        Omit,
        Extra(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let org = 0..ORGS.len();
        let unit = 0..UNITS.len();
        let delivery = 0..DELIVERIES.len();
        prop_oneof![
            (org.clone(), unit.clone(), proptest::option::of(delivery.clone()))
                .prop_map(|(org, unit, delivery)| Op::Register { org, unit, delivery }),
            (org.clone(), delivery.clone(), unit.clone(), 1..3usize)
                .prop_map(|(org, delivery, first, count)| Op::Initiate { org, delivery, first, count }),
            (org.clone(), delivery.clone(), unit.clone())
                .prop_map(|(org, delivery, unit)| Op::Augment { org, delivery, unit }),
            (org.clone(), delivery.clone(), 1..3usize)
                .prop_map(|(org, delivery, target)| Op::HandOff { org, delivery, target }),
            (
                org,
                delivery,
                prop_oneof![
                    Just(Scan::Exact),
                    Just(Scan::Reversed),
                    Just(Scan::Omit),
                    unit.prop_map(Scan::Extra),
                ]
            )
                .prop_map(|(org, delivery, scan)| Op::Accept { org, delivery, scan }),
        ]
    }

    fn members_scan(net: &CustodyNetwork, delivery_id: &str, scan: Scan) -> Vec<String> {
        let mut ids = net
            .projection()
            .read_delivery(delivery_id)
            .map(|d| d.unit_ids)
            .unwrap_or_default();
        match scan {
            Scan::Exact => {}
            Scan::Reversed => ids.reverse(),
            Scan::Omit => {
                ids.pop();
            }
            Scan::Extra(unit) => ids.push(UNITS[unit].to_string()),
        }
        ids
    }

    fn apply(net: &CustodyNetwork, op: &Op) -> bool {
        match *op {
            Op::Register { org, unit, delivery } => net
                .register(ORGS[org], UNITS[unit], delivery.map(|d| (DELIVERIES[d], RECIPIENT)))
                .is_ok(),
            Op::Initiate { org, delivery, first, count } => {
                let units: Vec<&str> = (0..count).map(|i| UNITS[(first + i) % UNITS.len()]).collect();
                net.initiate(ORGS[org], DELIVERIES[delivery], &units).is_ok()
            }
            Op::Augment { org, delivery, unit } => {
                net.augment(ORGS[org], DELIVERIES[delivery], UNITS[unit]).is_ok()
            }
            Op::HandOff { org, delivery, target } => {
                net.hand_off(ORGS[org], DELIVERIES[delivery], ORGS[target]).is_ok()
            }
            Op::Accept { org, delivery, scan } => {
                let scanned = members_scan(net, DELIVERIES[delivery], scan);
                let ctx = net.as_org(ORGS[org]);
                net.engine
                    .accept(&net.ledger, &ctx, DELIVERIES[delivery], &scanned)
                    .is_ok()
            }
        }
    }

    fn units(net: &CustodyNetwork) -> BTreeMap<String, Unit> {
        net.records()
            .into_iter()
            .filter_map(|r| match r {
                LedgerRecord::Unit(u) => Some((u.unit_id.clone(), u)),
                LedgerRecord::Delivery(_) => None,
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_random_operations_preserve_invariants(
            ops in proptest::collection::vec(op_strategy(), 1..40)
        ) {
            let net = CustodyNetwork::three_role();

            for op in &ops {
                let digest = net.ledger.state_digest();
                let before = units(&net);

                let accepted = apply(&net, op);
                if !accepted {
                    prop_assert_eq!(net.ledger.state_digest(), digest, "rejected {:?} wrote", op);
                }

                prop_assert!(net.check_consistency().is_ok(), "after {:?}", op);

                for (unit_id, after) in units(&net) {
                    match before.get(&unit_id) {
                        Some(prev) if prev == &after => {}
                        Some(prev) => prop_assert!(
                            check_single_event_appended(prev, &after),
                            "{} lost or skipped history after {:?}", unit_id, op
                        ),
                        None => prop_assert_eq!(after.history.len(), 1),
                    }
                    if after.status == UnitStatus::Delivered {
                        prop_assert_eq!(after.current_owner_org.as_str(), RECIPIENT);
                    }
                }
            }

            for record in net.records() {
                if let LedgerRecord::Delivery(d) = record {
                    prop_assert!(!d.unit_ids.is_empty());
                    if d.status == DeliveryStatus::Completed {
                        prop_assert!(d.carrier_org.is_some());
                    }
                }
            }
        }
    }
}
