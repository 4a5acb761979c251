use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::REPORTS_FETCH_ALERT;

/// Sampling precondition violated by a caller of the random source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("Invalid sample size: requested {requested} from a pool of {available}")]
    InvalidSampleSize { requested: usize, available: usize },
}

/// Snapshot generation failed; fatal to session start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Equipment roster could not be sampled: {0}")]
    EquipmentPool(#[from] SampleError),
}

/// The outbound analysis trigger failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveTriggerError {
    #[error("Analysis service returned HTTP {0}")]
    Status(u16),

    #[error("Analysis service unreachable: {0}")]
    Network(String),
}

/// Fetching the AI reports document failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportsFetchError {
    #[error("Reports endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Reports endpoint unreachable: {0}")]
    Network(String),

    #[error("Reports response was not valid JSON: {0}")]
    Decode(String),
}

impl ReportsFetchError {
    /// Generic text shown to the user regardless of the cause.
    pub fn user_message(&self) -> &'static str {
        REPORTS_FETCH_ALERT
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Unknown tab: {0}")]
    InvalidTab(String),

    #[error("Unknown zone: {0}")]
    InvalidZone(String),

    #[error("Unknown historic range: {0}")]
    InvalidRange(String),

    #[error("No zone selected")]
    NoZoneSelected,

    #[error("Report is not saved yet")]
    ReportNotSaved,

    #[error("{}", .0.user_message())]
    ReportsUnavailable(#[from] ReportsFetchError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::InvalidTab(_) => StatusCode::BAD_REQUEST,
            DashboardError::InvalidZone(_) => StatusCode::BAD_REQUEST,
            DashboardError::InvalidRange(_) => StatusCode::BAD_REQUEST,
            DashboardError::NoZoneSelected => StatusCode::NOT_FOUND,
            DashboardError::ReportNotSaved => StatusCode::CONFLICT,
            DashboardError::ReportsUnavailable(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
