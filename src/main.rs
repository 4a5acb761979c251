mod activity_log;
mod analysis_client;
mod config;
mod dashboard;
mod error;
mod historic;
mod navigation;
mod random;
mod report;
mod reports_viewer;
mod routes;
mod server;
mod state;
mod telemetry;

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use activity_log::{LogLevel, LogSource};
use analysis_client::HttpAnalysisClient;
use config::{CliArgs, DashboardConfig};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camcogni_dashboard=info,tower_http=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    info!("Starting camcogni-dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!("Analysis service: {}", args.analysis_url);
    info!("Seed: {:?}", args.seed);

    let config = match DashboardConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid analysis URL: {}", e);
            std::process::exit(1);
        }
    };
    let port = config.port;

    let transport = Arc::new(HttpAnalysisClient::new(&config)?);
    let state = match AppState::new(config, transport) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Session start aborted: {}", e);
            std::process::exit(1);
        }
    };

    {
        let session = state.dashboard.read().await;
        info!(
            "Session {} generated: {} zones, {} alerts, {} equipment units",
            session.id,
            session.snapshot().zones.len(),
            session.snapshot().alerts.len(),
            session.snapshot().equipment.len()
        );
    }

    state
        .logs
        .emit(
            LogSource::Server,
            LogLevel::Info,
            format!("Dashboard starting on port {}", port),
        )
        .await;

    // Build and start HTTP server
    let router = server::build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Dashboard listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await?;

    info!("Dashboard shutting down");
    Ok(())
}

async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Received shutdown signal");
    state
        .logs
        .emit(LogSource::Server, LogLevel::Info, "Shutdown signal received")
        .await;
}
