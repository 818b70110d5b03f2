//! Logging infrastructure
//!
//! Structured logging via tracing. `RUST_LOG` overrides the configured
//! default filter; production emits JSON lines for log shipping.

use crate::config::Config;

/// Initialize the global tracing subscriber
pub fn init(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pos_core={},sqlx=warn", config.log_level).into());

    if config.environment == "production" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}
