//! Shared application state for the Axum API server.

use std::sync::Arc;

use herald_common::config::AppConfig;
use herald_engine::Dispatcher;
use herald_telemetry::TelemetryClient;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub telemetry: Arc<TelemetryClient>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        telemetry: Arc<TelemetryClient>,
        config: AppConfig,
    ) -> Self {
        Self {
            dispatcher,
            telemetry,
            config,
        }
    }
}
