//! Published-flow endpoints consumed by the native SDK.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use super::parse_app_id;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/flows
pub async fn list_flows(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ids = state.flows.list().await?;
    Ok(Json(DataResponse { data: ids }))
}

/// GET /api/v1/flows/{app_id}
pub async fn get_flow(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let app_id = parse_app_id(&app_id)?;
    let flow = state
        .flows
        .fetch(&app_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published flow for app id {app_id}")))?;

    tracing::debug!(app_id = %app_id, slides = flow.slides.len(), "Published flow served");
    Ok(Json(DataResponse { data: flow }))
}
