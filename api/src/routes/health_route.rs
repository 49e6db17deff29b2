//! GET /health — probes the Ollama backend.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

/// Handler: GET /health
///
/// Always answers 200 with `data.ok` reflecting backend reachability; the
/// probe itself never fails the request.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let status = state.health.check(&state.llm_cfg).await;
    ApiResponse::success(status).into_response_with_status(StatusCode::OK)
}
