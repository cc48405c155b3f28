//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_LEVEL | info | tracing level filter |
//! | SWEEP_INTERVAL_SECS | 3600 | reconciliation sweep interval |
//! | DEEP_SWEEP_HOUR | 2 | local hour of the daily deep pass |
//! | SEED_DEMO_DATA | false | seed the demo room inventory at startup |

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Interval between reconciliation sweeps (seconds)
    pub sweep_interval_secs: u64,
    /// Local hour (0-23) of the daily deep reconciliation pass
    pub deep_sweep_hour: u32,
    /// Seed the demo room inventory when the store is empty
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3600),
            deep_sweep_hour: std::env::var("DEEP_SWEEP_HOUR")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|h| *h < 24)
                .unwrap_or(2),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            sweep_interval_secs: 3600,
            deep_sweep_hour: 2,
            seed_demo_data: false,
        }
    }
}
