//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, rpc};
use crate::state::AppState;

/// Legacy RPC path accepted alongside `/`.
pub const RPC2_PATH: &str = "/RPC2";

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// - `POST /` - JSON-RPC endpoint
/// - `POST /RPC2` - Same endpoint under the conventional RPC path
/// - `GET /health` - Health check
///
/// Calls are not subject to a request timeout; the store is the only
/// place a call can wait.
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let max_concurrent_requests = state.config.max_concurrent_requests.max(1);

    let state = Arc::new(state);

    let rpc_routes = Router::new()
        .route("/", post(rpc::handle_rpc))
        .route(RPC2_PATH, post(rpc::handle_rpc))
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests));

    Router::new()
        // Health (no concurrency limit)
        .route("/health", get(health::health))
        .merge(rpc_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
