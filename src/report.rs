//! Save-report workflow: `Idle -> Saving -> Saved`.
//!
//! Entering `Saving` fires one analysis trigger, then waits the settle delay
//! whatever the trigger's outcome. Only a successful trigger followed by the
//! full delay reaches `Saved`; a failed one drops back to `Idle`. A second
//! start while `Saving` is a no-op, never a queued retry, and there is no
//! cancellation once the delay begins.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info};
use uuid::Uuid;

use crate::activity_log::{ActivityLog, LogLevel, LogSource};
use crate::analysis_client::AnalysisTransport;
use crate::error::{DashboardError, SaveTriggerError};
use crate::navigation::NavigationTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportState {
    Idle,
    Saving,
    Saved,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportJob {
    pub state: ReportState,
    pub job_id: Option<Uuid>,
    pub attempts: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Kept after a failed trigger so the caller can surface it.
    pub last_error: Option<String>,
}

impl ReportJob {
    pub fn new() -> Self {
        Self {
            state: ReportState::Idle,
            job_id: None,
            attempts: 0,
            started_at: None,
            completed_at: None,
            last_error: None,
        }
    }
}

impl Default for ReportJob {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of asking the workflow to start.
#[derive(Debug)]
pub enum SaveStart {
    Started {
        job_id: Uuid,
        handle: JoinHandle<Result<(), SaveTriggerError>>,
    },
    AlreadySaving,
    AlreadySaved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaving,
    AlreadySaved,
}

struct ReportInner {
    job: RwLock<ReportJob>,
    transport: Arc<dyn AnalysisTransport>,
    settle_delay: Duration,
    logs: ActivityLog,
}

/// Singleton per session; clones share the same job.
#[derive(Clone)]
pub struct ReportWorkflow {
    inner: Arc<ReportInner>,
}

impl ReportWorkflow {
    pub fn new(
        transport: Arc<dyn AnalysisTransport>,
        settle_delay: Duration,
        logs: ActivityLog,
    ) -> Self {
        Self {
            inner: Arc::new(ReportInner {
                job: RwLock::new(ReportJob::new()),
                transport,
                settle_delay,
                logs,
            }),
        }
    }

    pub async fn status(&self) -> ReportJob {
        self.inner.job.read().await.clone()
    }

    pub async fn state(&self) -> ReportState {
        self.inner.job.read().await.state
    }

    pub fn settle_delay(&self) -> Duration {
        self.inner.settle_delay
    }

    /// Guarded `Idle -> Saving`. Returns the new job id, or the blocking state.
    async fn begin(&self) -> Result<Uuid, ReportState> {
        let mut job = self.inner.job.write().await;
        match job.state {
            ReportState::Saving | ReportState::Saved => Err(job.state),
            ReportState::Idle => {
                let job_id = Uuid::new_v4();
                job.state = ReportState::Saving;
                job.job_id = Some(job_id);
                job.attempts += 1;
                job.started_at = Some(Utc::now());
                job.completed_at = None;
                job.last_error = None;
                Ok(job_id)
            }
        }
    }

    /// Start the job in the background. The state is already `Saving` when this returns.
    pub async fn start(&self) -> SaveStart {
        match self.begin().await {
            Ok(job_id) => {
                let inner = self.inner.clone();
                let handle = tokio::spawn(async move { run_job(inner, job_id).await });
                SaveStart::Started { job_id, handle }
            }
            Err(ReportState::Saved) => SaveStart::AlreadySaved,
            Err(_) => SaveStart::AlreadySaving,
        }
    }

    /// Run the job to completion on the caller's task.
    pub async fn save(&self) -> Result<SaveOutcome, SaveTriggerError> {
        match self.begin().await {
            Ok(job_id) => {
                run_job(self.inner.clone(), job_id).await?;
                Ok(SaveOutcome::Saved)
            }
            Err(ReportState::Saved) => Ok(SaveOutcome::AlreadySaved),
            Err(_) => Ok(SaveOutcome::AlreadySaving),
        }
    }

    /// The single exit from `Saved`.
    pub async fn continue_to_summary(&self) -> Result<NavigationTarget, DashboardError> {
        match self.state().await {
            ReportState::Saved => Ok(NavigationTarget::HistoricSummary),
            _ => Err(DashboardError::ReportNotSaved),
        }
    }
}

async fn run_job(inner: Arc<ReportInner>, job_id: Uuid) -> Result<(), SaveTriggerError> {
    info!("Report job {} started", job_id);
    inner
        .logs
        .emit(
            LogSource::Report,
            LogLevel::Info,
            format!("Saving report (job {})", job_id),
        )
        .await;

    let outcome = inner.transport.trigger_analysis().await;

    // The dashboard UI shows nothing on failure; the error goes to tracing,
    // the activity log, `last_error` and the job's result.
    if let Err(e) = &outcome {
        error!("Report job {} trigger failed: {}", job_id, e);
        inner
            .logs
            .emit(
                LogSource::Report,
                LogLevel::Error,
                format!("Analysis trigger failed: {}", e),
            )
            .await;
    }

    // Settle delay runs whatever the trigger returned.
    sleep(inner.settle_delay).await;

    {
        let mut job = inner.job.write().await;
        match &outcome {
            Ok(()) => {
                job.state = ReportState::Saved;
                job.completed_at = Some(Utc::now());
            }
            Err(e) => {
                job.state = ReportState::Idle;
                job.last_error = Some(e.to_string());
            }
        }
    }

    match &outcome {
        Ok(()) => {
            info!("Report job {} saved", job_id);
            inner
                .logs
                .emit(LogSource::Report, LogLevel::Info, "Report saved")
                .await;
        }
        Err(_) => {
            inner
                .logs
                .emit(
                    LogSource::Report,
                    LogLevel::Warn,
                    "Report save abandoned, workflow back to idle",
                )
                .await;
        }
    }

    outcome
}
