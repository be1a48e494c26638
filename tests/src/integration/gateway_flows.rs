//! # Gateway Flows
//!
//! The runtime as an outside caller sees it: configuration from variables,
//! function-name dispatch and the JSON-lines script driver.

#[cfg(test)]
mod tests {
    use fc_01_ledger_access::InMemoryLedger;
    use node_runtime::{build_gateway, build_ledger, RuntimeConfig, ScriptRunner};
    use serde_json::Value;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = RuntimeConfig::from_lookup(move |name| vars.get(name).cloned()).unwrap();
        config.validate().unwrap();
        config
    }

    fn request(org: &str, identity: &str, function: &str, args: &[&str]) -> String {
        serde_json::json!({
            "org": org,
            "identity": identity,
            "function": function,
            "args": args,
        })
        .to_string()
    }

    async fn run(config: &RuntimeConfig, ledger: &InMemoryLedger, lines: &[String]) -> Vec<Value> {
        let gateway = build_gateway(config);
        let runner = ScriptRunner::new(&gateway, ledger);
        let script = lines.join("\n");
        let mut output = Vec::new();
        let summary = runner.run(script.as_bytes(), &mut output).await.unwrap();
        assert_eq!(summary.executed, lines.len());

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_scenarios_through_script() {
        let config = config(&[]);
        let ledger = build_ledger(&config);
        let responses = run(
            &config,
            &ledger,
            &[
                request("Org1", "originator-1", "RegisterUnit", &["F001", "UREA", "50", "D001", "Org3"]),
                request("Org1", "originator-1", "HandOffDelivery", &["D001", "Org2", "carrier-1"]),
                request("Org2", "carrier-1", "AcceptDelivery", &["D001", "F001"]),
                request("Org2", "carrier-1", "HandOffDelivery", &["D001", "Org3", "recipient-1"]),
                request("Org3", "recipient-1", "AcceptDelivery", &["D001"]),
                request("Org3", "recipient-1", "AcceptDelivery", &["D001", "F001"]),
                request("Org3", "recipient-1", "ReadUnit", &["F001"]),
            ],
        )
        .await;

        assert!(responses[..4].iter().all(|r| r["ok"] == true));
        assert_eq!(responses[4]["error"]["code"], "CONTENT_MISMATCH");
        assert_eq!(responses[5]["result"]["status"], "COMPLETED");
        assert_eq!(responses[6]["result"]["currentOwnerOrg"], "Org3");
        assert_eq!(responses[6]["result"]["history"].as_array().unwrap().len(), 5);

        let tx_ids: Vec<&str> = responses.iter().map(|r| r["txId"].as_str().unwrap()).collect();
        assert!(tx_ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_two_role_chain_from_environment() {
        let config = config(&[
            ("FC_ORIGINATOR_ORG", "FactoryMSP"),
            ("FC_CARRIER_ORG", ""),
            ("FC_RECIPIENT_ORG", "FarmMSP"),
        ]);
        let ledger = build_ledger(&config);
        let responses = run(
            &config,
            &ledger,
            &[
                request("FactoryMSP", "plant-7", "InitiateDelivery", &["D001", "FarmMSP", "F001", "UREA", "40"]),
                request("FactoryMSP", "plant-7", "HandOffDelivery", &["D001", "FarmMSP", "farmer-2"]),
                request("FarmMSP", "farmer-3", "AcceptDelivery", &["D001", "F001"]),
                request("FarmMSP", "farmer-2", "AcceptDelivery", &["D001", "F001"]),
                request("FarmMSP", "farmer-2", "QueryUnitsByOwner", &["FarmMSP"]),
            ],
        )
        .await;

        assert_eq!(responses[1]["result"]["status"], "IN_TRANSIT_TO_RECIPIENT");
        assert_eq!(responses[2]["error"]["code"], "RECIPIENT_MISMATCH");
        assert_eq!(responses[3]["result"]["status"], "COMPLETED");
        assert_eq!(responses[4]["result"][0]["key"], "F001");
    }

    #[tokio::test]
    async fn test_queries_disabled_by_configuration() {
        let config = config(&[("FC_LEDGER_RICH_QUERY", "false")]);
        let ledger = build_ledger(&config);
        let responses = run(
            &config,
            &ledger,
            &[
                request("Org1", "originator-1", "RegisterUnit", &["F001", "UREA", "50"]),
                request("Org1", "originator-1", "QueryRecords", &[r#"{"selector":{"docType":"unit"}}"#]),
                request("Org1", "originator-1", "ReadUnit", &["F001"]),
            ],
        )
        .await;

        assert_eq!(responses[1]["error"]["code"], "QUERY_UNSUPPORTED");
        assert_eq!(responses[2]["ok"], true);
    }

    #[tokio::test]
    async fn test_rejected_lines_leave_ledger_untouched() {
        let config = config(&[]);
        let ledger = build_ledger(&config);
        run(
            &config,
            &ledger,
            &[request("Org1", "originator-1", "InitiateDelivery", &["D001", "Org3", "F001", "UREA", "10"])],
        )
        .await;
        let digest = ledger.state_digest();

        let responses = run(
            &config,
            &ledger,
            &[
                request("Org3", "recipient-1", "AcceptDelivery", &["D001", "F001"]),
                request("Org2", "carrier-1", "AddUnitToDelivery", &["D001", "F002", "NPK", "5"]),
                request("Org1", "originator-1", "HandOffDelivery", &["D001", "Org3", "recipient-1"]),
                request("Org1", "originator-1", "RegisterUnit", &["F003", "UREA", "0"]),
                "{\"org\":\"Org1\"".to_string(),
            ],
        )
        .await;

        let codes: Vec<&str> = responses
            .iter()
            .map(|r| r["error"]["code"].as_str().unwrap())
            .collect();
        assert_eq!(
            codes,
            vec![
                "INVALID_STATE",
                "UNAUTHORIZED",
                "UNAUTHORIZED",
                "INVALID_ARGUMENT",
                "INVALID_ARGUMENT",
            ]
        );
        assert_eq!(ledger.state_digest(), digest);
    }
}
