// Library crate for integration tests.
// main.rs has its own mod declarations; this re-exports all modules.

pub mod activity_log;
pub mod analysis_client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod historic;
pub mod navigation;
pub mod random;
pub mod report;
pub mod reports_viewer;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
