//! Notification service API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use herald_common::config::AppConfig;
use herald_common::db::create_pool;
use herald_delivery::SimulatedEmailChannel;
use herald_directory::HttpUserDirectory;
use herald_engine::Dispatcher;
use herald_engine::store::{InMemoryNotificationStore, NotificationStore, PgNotificationStore};
use herald_telemetry::TelemetryClient;

use herald_api::routes::create_router;
use herald_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("herald_api=debug,herald_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting notification service...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Pick the store backend
    let store: Arc<dyn NotificationStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.db_max_connections).await?;
            sqlx::migrate!("../../migrations").run(&pool).await?;
            tracing::info!("Database pool created");
            Arc::new(PgNotificationStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; notifications will not survive a restart");
            Arc::new(InMemoryNotificationStore::new())
        }
    };

    // External collaborators
    let telemetry = Arc::new(TelemetryClient::new(
        config.telemetry_service_url.clone(),
        config.service_name.clone(),
    ));
    let directory = HttpUserDirectory::new(
        config.user_service_url.clone(),
        Duration::from_millis(config.user_service_timeout_ms),
    )?;
    let email = SimulatedEmailChannel::from_config(&config, telemetry.clone());

    // Build the dispatcher and application state
    let dispatcher = Arc::new(Dispatcher::new(
        store,
        Arc::new(directory),
        Arc::new(email),
        telemetry.clone(),
    ));
    let state = AppState::new(dispatcher, telemetry, config.clone());

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
