//! Liveness endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use super::envelope::{ApiError, ApiResponse};
use super::state::AppState;

/// GET /healthcheck
///
/// Succeeds while the document store answers a ping.
pub async fn healthcheck(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.store.ping().await?;
    Ok(ApiResponse::ok(json!({ "status": "OK" }), "Service is healthy"))
}
