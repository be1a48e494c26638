//! # Script Mode
//!
//! Executes gateway invocations read as JSON lines, one ledger transaction
//! per line:
//!
//! ```text
//! {"org":"Org1","identity":"originator-1","function":"RegisterUnit","args":["F001","UREA","50"]}
//! ```
//!
//! Each input line produces exactly one output line, either
//! `{"ok":true,"result":...,"txId":...}` or
//! `{"error":{"code":...,"message":...},"ok":false,...}`. Blank lines are
//! skipped. A line that is not a valid request is answered with an
//! `INVALID_ARGUMENT` error and never reaches the ledger.

use crate::gateway::Gateway;
use fc_01_ledger_access::InMemoryLedger;
use fc_02_entity_repository::encode_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{CustodyError, CustodyErrorPayload, Invocation};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use uuid::Uuid;

/// One invocation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptRequest {
    pub org: String,
    pub identity: String,
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// One invocation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CustodyErrorPayload>,
    /// Transaction the invocation ran in. Absent for unparseable lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
}

impl ScriptResponse {
    fn success(result: Value, tx_id: String) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
            tx_id: Some(tx_id),
        }
    }

    fn failure(err: &CustodyError, tx_id: Option<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(err.into()),
            tx_id,
        }
    }
}

/// Counters for one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub executed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs scripts against one gateway and one ledger.
pub struct ScriptRunner<'a> {
    gateway: &'a Gateway,
    ledger: &'a InMemoryLedger,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(gateway: &'a Gateway, ledger: &'a InMemoryLedger) -> Self {
        Self { gateway, ledger }
    }

    /// Execute one request line in a fresh ledger transaction.
    pub fn execute_line(&self, line: &str) -> ScriptResponse {
        let request: ScriptRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                let err = CustodyError::InvalidArgument(format!("invalid request: {e}"));
                return ScriptResponse::failure(&err, None);
            }
        };

        let stamp = self.ledger.begin_transaction();
        let ctx = Invocation::new(&request.org, &request.identity, stamp.timestamp);
        let outcome = self
            .gateway
            .invoke(self.ledger, &ctx, &request.function, &request.args)
            .and_then(|bytes| {
                serde_json::from_slice::<Value>(&bytes)
                    .map_err(|e| CustodyError::malformed(&request.function, e.to_string()))
            });

        match outcome {
            Ok(result) => ScriptResponse::success(result, stamp.tx_id),
            Err(err) => ScriptResponse::failure(&err, Some(stamp.tx_id)),
        }
    }

    /// Execute every line of `input`, writing one response line per request
    /// to `output`.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> io::Result<ScriptSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let session = Uuid::new_v4();
        info!(%session, "Script session started");

        let mut summary = ScriptSummary::default();
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response = self.execute_line(&line);
            summary.executed += 1;
            if response.ok {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
            debug!(%session, line = summary.executed, ok = response.ok, "Request executed");

            let json = serde_json::to_value(&response).map_err(io::Error::other)?;
            let mut bytes = encode_value(json).map_err(io::Error::other)?;
            bytes.push(b'\n');
            output.write_all(&bytes).await?;
        }
        output.flush().await?;

        info!(
            %session,
            executed = summary.executed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Script session finished"
        );
        Ok(summary)
    }
}
