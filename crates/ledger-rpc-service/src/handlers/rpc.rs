//! JSON-RPC endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::rpc::RpcResponse;
use crate::state::AppState;

/// Dispatch one JSON-RPC call.
///
/// The body is taken raw so that malformed JSON still yields a JSON-RPC
/// parse-error response rather than an HTTP rejection.
pub async fn handle_rpc(State(state): State<Arc<AppState>>, body: Bytes) -> Json<RpcResponse> {
    let response = state
        .dispatcher
        .handle(Arc::clone(&state.service), &body)
        .await;
    Json(response)
}
