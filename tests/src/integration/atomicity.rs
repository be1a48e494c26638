//! # Rejected Operations Are Invisible
//!
//! Every rejected call must leave every ledger value byte-identical. Each
//! test takes a snapshot, makes the failing call, and compares.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::*;
    use fc_01_ledger_access::LedgerAccessor;
    use fc_02_entity_repository::encode_record;
    use shared_types::{CustodyError, DeliveryStatus, LedgerRecord};

    /// Run `op`, require it to fail, and require the ledger to be unchanged.
    fn assert_rejected_cleanly<T: std::fmt::Debug>(
        net: &CustodyNetwork,
        op: impl FnOnce(&CustodyNetwork) -> Result<T, CustodyError>,
    ) -> CustodyError {
        let before = net.ledger.snapshot();
        let digest = net.ledger.state_digest();
        let err = op(net).unwrap_err();
        assert_eq!(net.ledger.snapshot(), before, "rejected with {err} but state moved");
        assert_eq!(net.ledger.state_digest(), digest);
        err
    }

    fn delivery_at(status: DeliveryStatus) -> CustodyNetwork {
        let net = CustodyNetwork::three_role();
        net.initiate(ORIGINATOR, "D001", &["F001", "F002"]).unwrap();
        let steps: &[(&str, DeliveryStatus)] = &[
            (ORIGINATOR, DeliveryStatus::InTransitToCarrier),
            (CARRIER, DeliveryStatus::TransferredToCarrier),
            (CARRIER, DeliveryStatus::InTransitToRecipient),
            (RECIPIENT, DeliveryStatus::Completed),
        ];
        for (org, next) in steps {
            if net.delivery("D001").status == status {
                break;
            }
            match next {
                DeliveryStatus::InTransitToCarrier => net.hand_off(org, "D001", CARRIER),
                DeliveryStatus::InTransitToRecipient => net.hand_off(org, "D001", RECIPIENT),
                _ => net.accept(org, "D001", &["F001", "F002"]),
            }
            .unwrap();
        }
        assert_eq!(net.delivery("D001").status, status);
        net
    }

    // =========================================================================
    // CONTENT MISMATCH
    // =========================================================================

    #[test]
    fn test_content_mismatch_by_omission_addition_substitution_and_repeat() {
        let net = delivery_at(DeliveryStatus::InTransitToCarrier);
        net.register(ORIGINATOR, "F009", None).unwrap();

        for scanned in [
            &["F001"][..],
            &["F001", "F002", "F009"][..],
            &["F001", "F009"][..],
            &["F001", "F002", "F002"][..],
            &[][..],
        ] {
            let err = assert_rejected_cleanly(&net, |n| n.accept(CARRIER, "D001", scanned));
            assert!(matches!(err, CustodyError::ContentMismatch { .. }), "{scanned:?}: {err}");
        }
        net.accept(CARRIER, "D001", &["F002", "F001"]).unwrap();
    }

    #[test]
    fn test_content_mismatch_reports_both_sides() {
        let net = delivery_at(DeliveryStatus::InTransitToCarrier);
        let err = assert_rejected_cleanly(&net, |n| n.accept(CARRIER, "D001", &["F001", "F404"]));
        assert_eq!(
            err,
            CustodyError::ContentMismatch {
                delivery_id: "D001".to_string(),
                missing: ids(&["F002"]),
                unexpected: ids(&["F404"]),
            }
        );
    }

    // =========================================================================
    // WRONG PARTY / WRONG STATUS
    // =========================================================================

    #[test]
    fn test_every_wrong_party_is_rejected_without_effect() {
        for status in [
            DeliveryStatus::Initiated,
            DeliveryStatus::InTransitToCarrier,
            DeliveryStatus::TransferredToCarrier,
            DeliveryStatus::InTransitToRecipient,
            DeliveryStatus::Completed,
        ] {
            let net = delivery_at(status);
            for org in [ORIGINATOR, CARRIER, RECIPIENT, OUTSIDER] {
                let may_hand_off = matches!(
                    (status, org),
                    (DeliveryStatus::Initiated, ORIGINATOR)
                        | (DeliveryStatus::TransferredToCarrier, CARRIER)
                );
                let may_accept = matches!(
                    (status, org),
                    (DeliveryStatus::InTransitToCarrier, CARRIER)
                        | (DeliveryStatus::InTransitToRecipient, RECIPIENT)
                );

                if !may_hand_off {
                    for target in [CARRIER, RECIPIENT] {
                        let err = assert_rejected_cleanly(&net, |n| n.hand_off(org, "D001", target));
                        assert!(
                            matches!(
                                err,
                                CustodyError::Unauthorized { .. } | CustodyError::InvalidState { .. }
                            ),
                            "{status} {org} -> {target}: {err}"
                        );
                    }
                }
                if !may_accept {
                    let err = assert_rejected_cleanly(&net, |n| {
                        n.accept(org, "D001", &["F001", "F002"])
                    });
                    assert!(
                        matches!(
                            err,
                            CustodyError::Unauthorized { .. } | CustodyError::InvalidState { .. }
                        ),
                        "{status} {org} accept: {err}"
                    );
                }
            }
            net.check_consistency().unwrap();
        }
    }

    #[test]
    fn test_completed_delivery_is_terminal() {
        let net = delivery_at(DeliveryStatus::Completed);
        for org in [ORIGINATOR, CARRIER, RECIPIENT] {
            let err = assert_rejected_cleanly(&net, |n| n.hand_off(org, "D001", CARRIER));
            assert!(matches!(err, CustodyError::InvalidState { .. }));
            let err = assert_rejected_cleanly(&net, |n| n.accept(org, "D001", &["F001", "F002"]));
            assert!(matches!(err, CustodyError::InvalidState { .. }));
        }
    }

    #[test]
    fn test_augment_after_initiated_is_invalid_state_for_everyone() {
        for status in [
            DeliveryStatus::InTransitToCarrier,
            DeliveryStatus::TransferredToCarrier,
            DeliveryStatus::InTransitToRecipient,
            DeliveryStatus::Completed,
        ] {
            let net = delivery_at(status);
            for org in [ORIGINATOR, CARRIER, RECIPIENT, OUTSIDER] {
                let err = assert_rejected_cleanly(&net, |n| n.augment(org, "D001", "F050"));
                assert!(
                    matches!(err, CustodyError::InvalidState { .. }),
                    "{status} {org}: {err}"
                );
            }
        }
    }

    // =========================================================================
    // CREATION CONFLICTS
    // =========================================================================

    #[test]
    fn test_creation_conflicts_write_nothing() {
        let net = CustodyNetwork::three_role();
        net.initiate(ORIGINATOR, "D001", &["F001"]).unwrap();

        let err = assert_rejected_cleanly(&net, |n| n.register(ORIGINATOR, "F001", None));
        assert_eq!(err, CustodyError::already_exists("F001"));

        let err = assert_rejected_cleanly(&net, |n| n.initiate(ORIGINATOR, "D002", &["F002", "F001"]));
        assert_eq!(err, CustodyError::already_exists("F001"));

        let err = assert_rejected_cleanly(&net, |n| n.initiate(ORIGINATOR, "D001", &["F003"]));
        assert_eq!(err, CustodyError::already_exists("D001"));

        let err = assert_rejected_cleanly(&net, |n| n.register(ORIGINATOR, "F004", Some(("F001", RECIPIENT))));
        assert_eq!(err, CustodyError::already_exists("F001"));

        let err = assert_rejected_cleanly(&net, |n| n.initiate(ORIGINATOR, "D003", &["F005", "F005"]));
        assert!(matches!(err, CustodyError::InvalidArgument(_)));

        let err = assert_rejected_cleanly(&net, |n| n.register(CARRIER, "F006", None));
        assert!(matches!(err, CustodyError::Unauthorized { .. }));
    }

    #[test]
    fn test_delivery_size_limit() {
        let net = CustodyNetwork::with_config(
            fc_03_custody_transfer::EngineConfig::default().with_max_units_per_delivery(2),
        );
        net.initiate(ORIGINATOR, "D001", &["F001", "F002"]).unwrap();
        let err = assert_rejected_cleanly(&net, |n| n.augment(ORIGINATOR, "D001", "F003"));
        assert!(matches!(err, CustodyError::InvalidArgument(_)));
        let err = assert_rejected_cleanly(&net, |n| n.initiate(ORIGINATOR, "D002", &["F010", "F011", "F012"]));
        assert!(matches!(err, CustodyError::InvalidArgument(_)));
    }

    // =========================================================================
    // FOREIGN WRITES
    // =========================================================================

    #[test]
    fn test_ownership_mismatch_on_tampered_member() {
        let net = delivery_at(DeliveryStatus::TransferredToCarrier);

        let mut unit = net.unit("F002");
        unit.current_owner_org = OUTSIDER.to_string();
        net.ledger.begin_transaction();
        net.ledger
            .put_state("F002", encode_record(&LedgerRecord::from(unit)).unwrap())
            .unwrap();

        let err = assert_rejected_cleanly(&net, |n| n.hand_off(CARRIER, "D001", RECIPIENT));
        assert_eq!(
            err,
            CustodyError::OwnershipMismatch {
                unit_id: "F002".to_string(),
                expected_org: CARRIER.to_string(),
                actual_org: OUTSIDER.to_string(),
            }
        );
        assert_eq!(net.unit("F001").current_owner_org, CARRIER);
    }

    #[test]
    fn test_malformed_member_blocks_transition() {
        let net = delivery_at(DeliveryStatus::Initiated);
        net.ledger.begin_transaction();
        net.ledger
            .put_state("F002", b"{\"docType\":\"unit\"}".to_vec())
            .unwrap();

        let err = assert_rejected_cleanly(&net, |n| n.hand_off(ORIGINATOR, "D001", CARRIER));
        assert!(matches!(err, CustodyError::MalformedRecord { .. }));
    }
}
