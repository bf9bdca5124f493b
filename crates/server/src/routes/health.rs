//! Banner and health checks.

use axum::{Json, extract::State, http::StatusCode};

use super::MessageResponse;
use crate::state::AppState;

/// GET /
pub async fn banner() -> Json<MessageResponse> {
    Json(MessageResponse::new("Portfolio API Server is running."))
}

/// Liveness: the process is up.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness: the database answers.
pub async fn ready(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
