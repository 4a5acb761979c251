use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::activity_log::ActivityLog;
use crate::analysis_client::AnalysisTransport;
use crate::config::DashboardConfig;
use crate::dashboard::DashboardSession;
use crate::error::GenerationError;
use crate::historic::HistoricAggregator;
use crate::random::StdRandom;
use crate::report::ReportWorkflow;

pub type SharedState = Arc<AppState>;

/// Everything one dashboard session owns. Each view's state sits behind its own lock.
pub struct AppState {
    pub config: DashboardConfig,
    pub started_at: DateTime<Utc>,
    pub dashboard: RwLock<DashboardSession>,
    pub historic: RwLock<HistoricAggregator>,
    pub report: ReportWorkflow,
    pub transport: Arc<dyn AnalysisTransport>,
    pub logs: ActivityLog,
}

impl AppState {
    /// Generates the session snapshot; a generation failure aborts startup.
    pub fn new(
        config: DashboardConfig,
        transport: Arc<dyn AnalysisTransport>,
    ) -> Result<Self, GenerationError> {
        let today = Utc::now().date_naive();
        Self::with_end_date(config, transport, today)
    }

    /// As `new`, with a fixed last day for the historic series.
    pub fn with_end_date(
        config: DashboardConfig,
        transport: Arc<dyn AnalysisTransport>,
        historic_end: NaiveDate,
    ) -> Result<Self, GenerationError> {
        let logs = ActivityLog::new();
        let dashboard =
            DashboardSession::start(Box::new(StdRandom::from_seed_opt(config.seed)))?;
        let historic = HistoricAggregator::new(
            Box::new(StdRandom::from_seed_opt(config.historic_seed())),
            historic_end,
        );
        let report = ReportWorkflow::new(transport.clone(), config.settle_delay, logs.clone());

        Ok(Self {
            config,
            started_at: Utc::now(),
            dashboard: RwLock::new(dashboard),
            historic: RwLock::new(historic),
            report,
            transport,
            logs,
        })
    }
}
