use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Port the HTTP API listens on (default: 8084)
    pub http_port: u16,

    /// PostgreSQL connection string; when unset the service runs on the
    /// in-memory store
    pub database_url: Option<String>,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Base URL of the user identity service
    pub user_service_url: String,

    /// Request timeout for user directory lookups in milliseconds (default: 2000)
    pub user_service_timeout_ms: u64,

    /// Base URL of the telemetry collector
    pub telemetry_service_url: String,

    /// Service name reported in telemetry events
    pub service_name: String,

    /// Simulated email channel latency in milliseconds (default: 500)
    pub email_latency_ms: u64,

    /// Simulated email channel failure probability (default: 0.05)
    pub email_failure_rate: f64,

    /// Simulated SMS channel latency in milliseconds (default: 300)
    pub sms_latency_ms: u64,

    /// Simulated SMS channel failure probability (default: 0.03)
    pub sms_failure_rate: f64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8084".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_PORT must be a valid u16"))?,
            database_url: std::env::var("DATABASE_URL").ok(),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            user_service_url: std::env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            user_service_timeout_ms: std::env::var("USER_SERVICE_TIMEOUT_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("USER_SERVICE_TIMEOUT_MS must be a valid u64"))?,
            telemetry_service_url: std::env::var("TELEMETRY_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8086".to_string()),
            service_name: std::env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "notification-service".to_string()),
            email_latency_ms: std::env::var("EMAIL_LATENCY_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("EMAIL_LATENCY_MS must be a valid u64"))?,
            email_failure_rate: std::env::var("EMAIL_FAILURE_RATE")
                .unwrap_or_else(|_| "0.05".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("EMAIL_FAILURE_RATE must be a valid f64"))?,
            sms_latency_ms: std::env::var("SMS_LATENCY_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SMS_LATENCY_MS must be a valid u64"))?,
            sms_failure_rate: std::env::var("SMS_FAILURE_RATE")
                .unwrap_or_else(|_| "0.03".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SMS_FAILURE_RATE must be a valid f64"))?,
        })
    }
}
