use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity_log::{LogLevel, LogSource};
use crate::error::DashboardError;
use crate::historic::{HistoricAggregator, HistoricPoint, HistoricRange, HistoricSummary};
use crate::navigation::NavigationTarget;
use crate::reports_viewer;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RangeRequest {
    pub range: String,
}

#[derive(Serialize)]
pub struct HistoricResponse {
    pub range: HistoricRange,
    pub label: &'static str,
    pub window_days: u32,
    pub end_date: NaiveDate,
    pub series: Vec<HistoricPoint>,
    pub summary: Option<HistoricSummary>,
    pub back: NavigationTarget,
}

fn to_response(agg: &HistoricAggregator) -> HistoricResponse {
    let range = agg.range();
    HistoricResponse {
        range,
        label: range.label(),
        window_days: range.window_days(),
        end_date: agg.end_date(),
        series: agg.series().to_vec(),
        summary: agg.summary(),
        back: NavigationTarget::Blueprint,
    }
}

/// GET /historic
pub async fn get_historic(State(state): State<SharedState>) -> Json<HistoricResponse> {
    Json(to_response(&*state.historic.read().await))
}

/// POST /historic/range
pub async fn select_range(
    State(state): State<SharedState>,
    Json(req): Json<RangeRequest>,
) -> Result<Json<HistoricResponse>, DashboardError> {
    let range: HistoricRange = req.range.parse().map_err(DashboardError::InvalidRange)?;

    let response = {
        let mut agg = state.historic.write().await;
        agg.select_range(range);
        to_response(&agg)
    };

    state
        .logs
        .emit(
            LogSource::Historic,
            LogLevel::Info,
            format!("Historic range set to {}", range),
        )
        .await;

    Ok(Json(response))
}

/// GET /historic/reports: the AI reports JSON rendered as a document.
pub async fn reports(State(state): State<SharedState>) -> Result<Response, DashboardError> {
    let html =
        reports_viewer::fetch_reports_document(state.transport.as_ref(), &state.logs).await?;
    Ok(Html(html).into_response())
}
