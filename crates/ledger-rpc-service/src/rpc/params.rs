//! Positional argument access for RPC handlers.

use serde_json::Value;

use ledger_rpc_core::CreditInput;

use crate::error::RpcFault;

/// Positional arguments of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<Value>,
}

impl Params {
    /// Wrap decoded arguments.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the call carried no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Require exactly `expected` arguments.
    ///
    /// # Errors
    ///
    /// Returns an invalid-params fault on any other count.
    pub fn expect_arity(&self, method: &str, expected: usize) -> Result<(), RpcFault> {
        if self.values.len() == expected {
            return Ok(());
        }
        Err(RpcFault::invalid_params(format!(
            "{method} takes {expected} argument(s), {} given",
            self.values.len()
        )))
    }

    /// String argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-params fault if the argument is missing or not a string.
    pub fn string(&self, index: usize, what: &str) -> Result<&str, RpcFault> {
        match self.values.get(index) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(RpcFault::invalid_params(format!(
                "{what} must be a string, got {other}"
            ))),
            None => Err(RpcFault::invalid_params(format!("missing {what}"))),
        }
    }

    /// Credit argument at `index`, left unvalidated.
    ///
    /// Integers pass through. Strings stay as text so the ledger decides
    /// whether they read as a number. Anything else, including
    /// fractional numbers, becomes `CreditInput::Other`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-params fault if the argument is missing.
    pub fn credit(&self, index: usize) -> Result<CreditInput, RpcFault> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| RpcFault::invalid_params("missing credit"))?;

        Ok(match value {
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => CreditInput::Integer(i),
                (None, Some(u)) => CreditInput::Text(u.to_string()),
                (None, None) => CreditInput::Other(n.to_string()),
            },
            Value::String(s) => CreditInput::Text(s.clone()),
            other => CreditInput::Other(other.to_string()),
        })
    }
}
