//! RPC fault types.
//!
//! A fault is what a caller receives in place of a result. Faults raised by
//! the account operations always carry
//! [`ledger_rpc_core::FAULT_CODE`]; the dispatcher uses
//! the standard JSON-RPC codes for envelope problems.

use serde::{Deserialize, Serialize};

use ledger_rpc_core::LedgerError;

/// JSON-RPC code: the body is not valid JSON.
pub const PARSE_ERROR: i32 = -32700;

/// JSON-RPC code: the body is JSON but not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;

/// JSON-RPC code: no method registered under the requested name.
pub const METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC code: wrong number or type of positional arguments.
pub const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC code: the result could not be encoded.
pub const INTERNAL_ERROR: i32 = -32603;

/// A fault returned to an RPC caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("fault {code}: {message}")]
pub struct RpcFault {
    /// Numeric fault code.
    pub code: i32,
    /// Human-readable description.
    pub message: String,
}

impl RpcFault {
    /// Create a fault.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Malformed JSON body.
    #[must_use]
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {detail}"))
    }

    /// Malformed request envelope.
    #[must_use]
    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_REQUEST, format!("Invalid request: {detail}"))
    }

    /// Unknown method name.
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Wrong arguments for a known method.
    #[must_use]
    pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
        Self::new(INVALID_PARAMS, format!("Invalid params: {detail}"))
    }

    /// Failure inside the dispatcher itself.
    #[must_use]
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self::new(INTERNAL_ERROR, format!("Internal error: {detail}"))
    }
}

impl From<LedgerError> for RpcFault {
    fn from(err: LedgerError) -> Self {
        if let LedgerError::Store(detail) = &err {
            tracing::error!(error = %detail, "Store failure while handling call");
        }
        Self::new(err.fault_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_rpc_core::ValidationError;

    #[test]
    fn ledger_errors_map_to_fault_code_one() {
        let fault = RpcFault::from(LedgerError::NoSuchName {
            name: "Ghost".into(),
        });
        assert_eq!(fault.code, 1);
        assert_eq!(fault.message, "No such name: 'Ghost'");

        let fault = RpcFault::from(LedgerError::from(ValidationError::CreditNotNumber {
            value: "x".into(),
        }));
        assert_eq!(fault.code, 1);
        assert_eq!(fault.message, "Credit must be a number.");
    }

    #[test]
    fn envelope_faults_use_json_rpc_codes() {
        assert_eq!(RpcFault::method_not_found("nope").code, -32601);
        assert_eq!(RpcFault::invalid_params("x").code, -32602);
        assert_eq!(RpcFault::parse_error("x").code, -32700);
        assert_eq!(RpcFault::invalid_request("x").code, -32600);
    }
}
