//! Storefront backend configuration
//!
//! The store id is deliberately not configuration: every ledger call takes it
//! as an explicit parameter, so one process can serve several stores.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storefront backend configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Connection pool size
    pub db_max_connections: u32,
    /// Pool acquire timeout in milliseconds
    pub db_acquire_timeout_ms: u64,
    /// Environment: development | staging | production
    pub environment: String,
    /// Default tracing filter, overridable via RUST_LOG
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        // Load .env file
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            db_acquire_timeout_ms: std::env::var("DB_ACQUIRE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        })
    }
}
