use crate::dtos::{InventionDateRequest, InventionDateResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

/// `POST /api/invention-date`
///
/// 400 for a blank item, 404 when the model's answer is not a year, 500 for
/// an undecodable or non-object body or a failed model call.
pub async fn get_invention_date(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<InventionDateResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected invention-date body");
        AppError::from(rejection)
    })?;

    let request = InventionDateRequest::from_body(body).map_err(|e| {
        tracing::warn!(error = %e, "Invention-date body has the wrong shape");
        AppError::InternalError(e)
    })?;

    let year = state
        .invention
        .invention_date(request.item.as_deref())
        .await?;

    Ok(Json(InventionDateResponse { year }))
}
