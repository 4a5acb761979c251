use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::DashboardConfig;
use crate::error::{ReportsFetchError, SaveTriggerError};

/// Remote analysis service as seen by the report workflow and the reports viewer.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// `POST {base}/run-analysis`. Any 2xx is success.
    async fn trigger_analysis(&self) -> Result<(), SaveTriggerError>;

    /// `GET {base}/reports`. Arbitrary JSON.
    async fn fetch_reports(&self) -> Result<serde_json::Value, ReportsFetchError>;
}

pub struct HttpAnalysisClient {
    client: reqwest::Client,
    run_analysis_url: Url,
    reports_url: Url,
}

impl HttpAnalysisClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = build_client(config.http_timeout)?;
        Ok(Self {
            client,
            run_analysis_url: config.run_analysis_url(),
            reports_url: config.reports_url(),
        })
    }

    pub fn run_analysis_url(&self) -> &Url {
        &self.run_analysis_url
    }

    pub fn reports_url(&self) -> &Url {
        &self.reports_url
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .build()
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisClient {
    async fn trigger_analysis(&self) -> Result<(), SaveTriggerError> {
        // No body and no auth header; the service only needs the trigger.
        let resp = self
            .client
            .post(self.run_analysis_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| SaveTriggerError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("run-analysis returned {}: {}", status, body);
            return Err(SaveTriggerError::Status(status.as_u16()));
        }

        debug!("run-analysis accepted ({})", status);
        Ok(())
    }

    async fn fetch_reports(&self) -> Result<serde_json::Value, ReportsFetchError> {
        let resp = self
            .client
            .get(self.reports_url.clone())
            .send()
            .await
            .map_err(|e| ReportsFetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ReportsFetchError::Status(status.as_u16()));
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| ReportsFetchError::Decode(e.to_string()))
    }
}
