use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::report::ReportState;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: String,
    pub session_id: String,
    pub report_state: ReportState,
    pub analysis_url: String,
    pub seeded: bool,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(build_health_response(&state).await)
}

pub async fn build_health_response(state: &SharedState) -> HealthResponse {
    let session_id = state.dashboard.read().await.id;
    let report_state = state.report.state().await;

    HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        session_id: session_id.to_string(),
        report_state,
        analysis_url: state.config.analysis_url.to_string(),
        seeded: state.config.seed.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serializes_to_json() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            started_at: "2025-02-21T08:00:00+00:00".to_string(),
            session_id: "00000000-0000-0000-0000-000000000000".to_string(),
            report_state: ReportState::Idle,
            analysis_url: "http://127.0.0.1:8000/".to_string(),
            seeded: false,
        };

        let json = serde_json::to_string(&response).expect("should serialize");
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"report_state\":\"idle\""));
        assert!(json.contains("\"seeded\":false"));
    }
}
