//! JSON-RPC 2.0 request and response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcFault;
use crate::rpc::params::Params;

/// Protocol version string carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// An inbound call.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    /// Protocol version; must be "2.0" when present.
    #[serde(default)]
    pub jsonrpc: Option<String>,
    /// Operation name.
    pub method: String,
    /// Positional arguments.
    #[serde(default)]
    pub params: Option<Value>,
    /// Caller-chosen correlation id, echoed back.
    #[serde(default)]
    pub id: Value,
}

impl RpcRequest {
    /// Decode a raw body. On failure, returns the response to send instead.
    ///
    /// # Errors
    ///
    /// Returns a failure response for malformed JSON or a malformed envelope.
    pub fn decode(body: &[u8]) -> Result<Self, Box<RpcResponse>> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Box::new(RpcResponse::failure(Value::Null, RpcFault::parse_error(e))))?;

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: Self = serde_json::from_value(value)
            .map_err(|e| Box::new(RpcResponse::failure(id.clone(), RpcFault::invalid_request(e))))?;

        if let Some(version) = request.jsonrpc.as_deref() {
            if version != JSONRPC_VERSION {
                return Err(Box::new(RpcResponse::failure(
                    id,
                    RpcFault::invalid_request(format!("unsupported jsonrpc version {version:?}")),
                )));
            }
        }

        Ok(request)
    }

    /// Split the positional arguments out of the envelope.
    ///
    /// # Errors
    ///
    /// Returns an invalid-params fault if `params` is present but not an array.
    pub fn positional_params(&self) -> Result<Params, RpcFault> {
        match &self.params {
            None | Some(Value::Null) => Ok(Params::default()),
            Some(Value::Array(values)) => Ok(Params::new(values.clone())),
            Some(_) => Err(RpcFault::invalid_params(
                "params must be a positional array",
            )),
        }
    }
}

/// An outbound result or fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Protocol version.
    pub jsonrpc: String,
    /// Result payload; `null` for operations without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Fault, when the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcFault>,
    /// Echo of the request id.
    pub id: Value,
}

impl RpcResponse {
    /// Successful response.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Failed response.
    #[must_use]
    pub fn failure(id: Value, fault: RpcFault) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(fault),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{INVALID_PARAMS, INVALID_REQUEST, PARSE_ERROR};
    use serde_json::json;

    #[test]
    fn decodes_positional_call() {
        let body = br#"{"jsonrpc":"2.0","method":"get_credit","params":["Customer1"],"id":7}"#;
        let request = RpcRequest::decode(body).unwrap();

        assert_eq!(request.method, "get_credit");
        assert_eq!(request.id, json!(7));
        let params = request.positional_params().unwrap();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn missing_params_means_no_arguments() {
        let request = RpcRequest::decode(br#"{"method":"get_all_accounts","id":1}"#).unwrap();
        assert!(request.positional_params().unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let response = RpcRequest::decode(b"{not json").unwrap_err();
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
        assert_eq!(response.id, Value::Null);
    }

    #[test]
    fn missing_method_is_an_invalid_request() {
        let response = RpcRequest::decode(br#"{"jsonrpc":"2.0","id":3}"#).unwrap_err();
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
        assert_eq!(response.id, json!(3));
    }

    #[test]
    fn wrong_version_is_an_invalid_request() {
        let response =
            RpcRequest::decode(br#"{"jsonrpc":"1.0","method":"x","id":3}"#).unwrap_err();
        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }

    #[test]
    fn named_params_are_rejected() {
        let request =
            RpcRequest::decode(br#"{"method":"get_credit","params":{"name":"A"},"id":1}"#)
                .unwrap();
        assert_eq!(request.positional_params().unwrap_err().code, INVALID_PARAMS);
    }

    #[test]
    fn null_result_is_serialized() {
        let response = RpcResponse::success(json!(1), Value::Null);
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded, json!({"jsonrpc": "2.0", "result": null, "id": 1}));
    }
}
