use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::DashboardError;
use crate::report::{ReportJob, SaveStart};
use crate::state::SharedState;

/// GET /report
pub async fn status(State(state): State<SharedState>) -> Json<ReportJob> {
    Json(state.report.status().await)
}

/// POST /report/save: starts the job in the background; repeat calls are no-ops.
pub async fn save(State(state): State<SharedState>) -> impl IntoResponse {
    let settle_ms = state.report.settle_delay().as_millis() as u64;
    match state.report.start().await {
        SaveStart::Started { job_id, .. } => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "status": "started",
                "job_id": job_id.to_string(),
                "settle_delay_ms": settle_ms,
            })),
        ),
        SaveStart::AlreadySaving => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "already_saving" })),
        ),
        SaveStart::AlreadySaved => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "already_saved" })),
        ),
    }
}

/// POST /report/continue: navigation out of `Saved`.
pub async fn continue_to_summary(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, DashboardError> {
    let target = state.report.continue_to_summary().await?;
    Ok(Json(serde_json::json!({
        "navigate": target,
        "path": target.path(),
    })))
}
