//! Ledger JSON-RPC client implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use ledger_rpc_core::{Account, Credit};

use crate::error::{ClientError, Result};
use crate::types::{RpcCall, RpcReply};

/// Ledger RPC client.
///
/// Provides one typed method per account operation, plus the
/// introspection calls.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    client: Client,
    endpoint: String,
    next_id: Arc<AtomicU64>,
}

impl LedgerClient {
    /// Create a new ledger client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g., `"http://ledger:8000"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new ledger client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/", base_url.into().trim_end_matches('/')),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Every account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns a fault.
    pub async fn get_all_accounts(&self) -> Result<Vec<Account>> {
        self.call_typed("get_all_accounts", &[]).await
    }

    /// The account with exactly this name, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns a fault.
    pub async fn get_account(&self, name: &str) -> Result<Option<Account>> {
        self.call_typed("get_account", &[json!(name)]).await
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Fault` for an invalid name or credit, or a
    /// duplicate name.
    pub async fn add_account(&self, name: &str, address: &str, credit: i64) -> Result<()> {
        self.call("add_account", &[json!(name), json!(address), json!(credit)])
            .await
            .map(drop)
    }

    /// Delete an existing account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Fault` if no such account exists.
    pub async fn delete_account(&self, name: &str) -> Result<()> {
        self.call("delete_account", &[json!(name)]).await.map(drop)
    }

    /// The credit of an existing account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Fault` if no such account exists.
    pub async fn get_credit(&self, name: &str) -> Result<Credit> {
        self.call_typed("get_credit", &[json!(name)]).await
    }

    /// Set the credit of an existing account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Fault` if no such account exists or the credit
    /// is negative or out of range.
    pub async fn update_credit(&self, name: &str, credit: i64) -> Result<()> {
        self.call("update_credit", &[json!(name), json!(credit)])
            .await
            .map(drop)
    }

    /// Names of all callable methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns a fault.
    pub async fn list_methods(&self) -> Result<Vec<String>> {
        self.call_typed("system.listMethods", &[]).await
    }

    /// Help text of a method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns a fault.
    pub async fn method_help(&self, method: &str) -> Result<String> {
        self.call_typed("system.methodHelp", &[json!(method)]).await
    }

    /// Poll `system.listMethods` until the service answers.
    ///
    /// Returns the method list from the first successful poll.
    ///
    /// # Errors
    ///
    /// Returns the last error once `attempts` polls have failed.
    pub async fn wait_until_ready(&self, attempts: u32, delay: Duration) -> Result<Vec<String>> {
        let attempts = attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.list_methods().await {
                Ok(methods) => {
                    debug!(attempt, methods = ?methods, "Service ready");
                    return Ok(methods);
                }
                Err(e) if attempt < attempts => {
                    warn!(attempt, max_attempts = attempts, error = %e, "Service not ready yet");
                }
                Err(e) => return Err(e),
            }
            attempt += 1;
            tokio::time::sleep(delay).await;
        }
    }

    /// Invoke `method` with positional `params` and return the raw result.
    ///
    /// # Errors
    ///
    /// - `ClientError::Http` / `ClientError::Status` for transport failures.
    /// - `ClientError::Fault` if the server returned a fault.
    /// - `ClientError::UnexpectedResponse` if the reply does not match the call.
    pub async fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let call = RpcCall {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        debug!(method = %method, id, "Sending RPC call");
        let response = self.client.post(&self.endpoint).json(&call).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: RpcReply = serde_json::from_slice(&response.bytes().await?)?;
        if reply.id != Value::from(id) {
            return Err(ClientError::UnexpectedResponse(format!(
                "expected id {id}, got {}",
                reply.id
            )));
        }

        match reply.error {
            Some(fault) => Err(ClientError::Fault {
                code: fault.code,
                message: fault.message,
            }),
            None => Ok(reply.result.unwrap_or(Value::Null)),
        }
    }

    async fn call_typed<T: DeserializeOwned>(&self, method: &str, params: &[Value]) -> Result<T> {
        let value = self.call(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
