//! Wire types for the JSON-RPC envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outbound call.
#[derive(Debug, Serialize)]
pub(crate) struct RpcCall<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a [Value],
    pub id: u64,
}

/// Fault body of a failed call.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcFaultBody {
    pub code: i32,
    pub message: String,
}

/// Inbound reply.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcReply {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcFaultBody>,
    #[serde(default)]
    pub id: Value,
}
