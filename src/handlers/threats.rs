//! Threat handlers

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::models::{Threat, ThreatFilter};
use crate::{AppError, AppResult, AppState};

/// List threat records, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ThreatFilter>,
) -> AppResult<Json<Vec<Threat>>> {
    let threats = Threat::list(&state.pool, filter).await?;
    Ok(Json(threats))
}

/// Get single threat record
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Threat>> {
    let threat = Threat::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Threat not found".to_string()))?;

    Ok(Json(threat))
}
