//! Dashboard statistics handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sqlx::Row;

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_threats: i64,
    pub active_threats: i64,
    pub resolved_threats: i64,
    pub critical_alerts: i64,
}

/// Aggregate counts over the threats table. Critical alerts are
/// high-severity records that are still active.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let row = sqlx::query(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(CASE WHEN status = 'active' THEN 1 END) AS active,
            COUNT(CASE WHEN status = 'resolved' THEN 1 END) AS resolved,
            COUNT(CASE WHEN severity = 'high' AND status = 'active' THEN 1 END) AS critical
        FROM threats
        "#,
    )
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(DashboardStats {
        total_threats: row.get::<i64, _>("total"),
        active_threats: row.get::<i64, _>("active"),
        resolved_threats: row.get::<i64, _>("resolved"),
        critical_alerts: row.get::<i64, _>("critical"),
    }))
}
