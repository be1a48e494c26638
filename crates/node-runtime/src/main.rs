//! # custody-node
//!
//! Reads gateway invocations as JSON lines from stdin and writes one JSON
//! result per line to stdout. Logs go to stderr.
//!
//! ```text
//! echo '{"org":"Org1","identity":"originator-1","function":"RegisterUnit","args":["F001","UREA","50"]}' \
//!     | custody-node
//! ```

use anyhow::{Context, Result};
use custody_telemetry::init_logging;
use node_runtime::{build_gateway, build_ledger, load_config, ScriptRunner};
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    init_logging(&config.telemetry).context("Failed to initialize logging")?;

    info!(
        originator = %config.engine.roles.originator(),
        carrier = config.engine.roles.carrier().unwrap_or("-"),
        recipient = %config.engine.roles.recipient(),
        rich_query = config.ledger_rich_query,
        "Starting custody node"
    );

    let ledger = build_ledger(&config);
    let gateway = build_gateway(&config);
    let runner = ScriptRunner::new(&gateway, &ledger);

    let summary = runner
        .run(BufReader::new(stdin()), stdout())
        .await
        .context("Failed to execute script")?;

    let stats = gateway.engine().stats();
    info!(
        executed = summary.executed,
        failed = summary.failed,
        units_created = stats.units_created,
        deliveries_initiated = stats.deliveries_initiated,
        hand_offs = stats.hand_offs,
        acceptances = stats.acceptances,
        rejected = stats.rejected,
        records = ledger.len(),
        state_digest = %ledger.state_digest(),
        "Custody node finished"
    );
    Ok(())
}
