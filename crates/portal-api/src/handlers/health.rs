use axum::{extract::State, Json};
use serde::Serialize;

use portal_core::SessionStatus;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Remote session broker state; never opens a session by itself
pub async fn session_status(State(state): State<AppState>) -> Json<ApiResponse<SessionStatus>> {
    Json(ApiResponse::success(state.broker.status()))
}
