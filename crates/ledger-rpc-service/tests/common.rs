//! Common test utilities for ledger-rpc integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use ledger_rpc_service::rpc::RpcResponse;
use ledger_rpc_service::{create_router, AppState, ServiceConfig};
use ledger_rpc_store::{bootstrap, AccountStore, MemoryStore};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for direct inspection.
    pub store: Arc<dyn AccountStore>,
}

impl TestHarness {
    /// Create a new test harness over a freshly seeded in-memory store.
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        bootstrap::prepare_schema(&store)
            .await
            .expect("Failed to seed store");
        Self::with_store(Arc::new(store))
    }

    /// Create a test harness over an arbitrary store.
    pub fn with_store(store: Arc<dyn AccountStore>) -> Self {
        let config = ServiceConfig {
            instance_name: "test-instance".into(),
            listen_addr: "127.0.0.1:0".into(),
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Send one JSON-RPC call and decode the envelope.
    pub async fn call(&self, method: &str, params: Value) -> RpcResponse {
        let response = self
            .server
            .post("/")
            .json(&json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": 1,
            }))
            .await;
        response.assert_status_ok();
        response.json::<RpcResponse>()
    }

    /// Call and expect a result.
    pub async fn result(&self, method: &str, params: Value) -> Value {
        let response = self.call(method, params).await;
        assert!(
            response.error.is_none(),
            "{method} faulted: {:?}",
            response.error
        );
        response.result.unwrap_or(Value::Null)
    }

    /// Call and expect a fault; returns `(code, message)`.
    pub async fn fault(&self, method: &str, params: Value) -> (i32, String) {
        let response = self.call(method, params).await;
        let fault = response
            .error
            .unwrap_or_else(|| panic!("{method} succeeded: {:?}", response.result));
        (fault.code, fault.message)
    }
}
