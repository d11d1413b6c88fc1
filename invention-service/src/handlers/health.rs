use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Liveness check. Never calls the model.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "invention-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: ready once the text provider has credentials.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.invention.provider().is_configured() {
        Ok(StatusCode::OK)
    } else {
        tracing::warn!("Readiness check failed: text provider not configured");
        Err(AppError::ServiceUnavailable)
    }
}
