//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Instance name.
    pub instance: String,
    /// Store backend in use.
    pub store: String,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "ledger-rpc".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instance: state.config.instance_name.clone(),
        store: state.service.store().backend().to_string(),
    })
}
