//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /health.
#[derive(Serialize)]
pub(crate) struct HealthResponse {
    /// Always `"ok"` while the server is answering.
    status: &'static str,
    /// Application version.
    version: String,
    /// Name of the configured rendering engine.
    engine: &'static str,
}

/// Handle GET /health.
pub(crate) async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
        engine: state.service.engine_name(),
    })
}
