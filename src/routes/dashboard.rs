use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::activity_log::{LogLevel, LogSource};
use crate::dashboard::{DashboardView, Tab, ZoneDetail};
use crate::error::DashboardError;
use crate::state::SharedState;
use crate::telemetry::{HeaderMetrics, MetricSnapshot, ZoneId};

// --- Request/Response types ---

#[derive(Deserialize)]
pub struct TabRequest {
    pub tab: String,
}

/// `zone` may be a name (`"Zone B"`), a letter or an id.
#[derive(Deserialize)]
pub struct ZoneRequest {
    pub zone: serde_json::Value,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub session_id: String,
    pub generated_at: String,
    pub view: DashboardView,
    pub header: HeaderMetrics,
    pub snapshot: MetricSnapshot,
}

fn parse_zone(raw: &serde_json::Value) -> Result<ZoneId, DashboardError> {
    let parsed = match raw {
        serde_json::Value::String(s) => s.parse::<ZoneId>().ok(),
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(ZoneId::from_number),
        _ => None,
    };
    parsed.ok_or_else(|| DashboardError::InvalidZone(raw.to_string()))
}

/// GET /dashboard
pub async fn get_dashboard(State(state): State<SharedState>) -> Json<DashboardResponse> {
    let session = state.dashboard.read().await;
    Json(DashboardResponse {
        session_id: session.id.to_string(),
        generated_at: session.generated_at.to_rfc3339(),
        view: session.view(),
        header: session.header_metrics(),
        snapshot: session.snapshot().clone(),
    })
}

/// POST /dashboard/tab
pub async fn select_tab(
    State(state): State<SharedState>,
    Json(req): Json<TabRequest>,
) -> Result<Json<DashboardView>, DashboardError> {
    let tab: Tab = req.tab.parse().map_err(DashboardError::InvalidTab)?;
    let view = state.dashboard.write().await.select_tab(tab);
    Ok(Json(view))
}

/// POST /dashboard/zone
pub async fn select_zone(
    State(state): State<SharedState>,
    Json(req): Json<ZoneRequest>,
) -> Result<Json<DashboardView>, DashboardError> {
    let zone = parse_zone(&req.zone)?;
    let view = state.dashboard.write().await.select_zone(zone);
    Ok(Json(view))
}

/// GET /dashboard/zone: detail panel for the selected zone.
pub async fn selected_zone(
    State(state): State<SharedState>,
) -> Result<Json<ZoneDetail>, DashboardError> {
    state
        .dashboard
        .read()
        .await
        .selected_zone_detail()
        .map(Json)
        .ok_or(DashboardError::NoZoneSelected)
}

/// POST /dashboard/regenerate
pub async fn regenerate(
    State(state): State<SharedState>,
) -> Result<Json<DashboardResponse>, DashboardError> {
    let response = {
        let mut session = state.dashboard.write().await;
        session.regenerate()?;
        DashboardResponse {
            session_id: session.id.to_string(),
            generated_at: session.generated_at.to_rfc3339(),
            view: session.view(),
            header: session.header_metrics(),
            snapshot: session.snapshot().clone(),
        }
    };

    state
        .logs
        .emit(
            LogSource::Dashboard,
            LogLevel::Info,
            "Telemetry snapshot regenerated",
        )
        .await;

    Ok(Json(response))
}
