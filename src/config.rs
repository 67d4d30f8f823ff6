use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Health classification thresholds
    pub maintenance_window_days: i64,
    pub weak_signal_threshold_dbm: i32,

    // Read-side caps
    pub telemetry_default_limit: u64,
    pub alerts_default_limit: u64,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_read_per_second: u64,
    pub rate_limit_read_burst: u32,
    pub rate_limit_ingest_per_second: u64,
    pub rate_limit_ingest_burst: u32,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            // Thresholds. Defaults match the behavior the field devices were
            // tuned against; override with care.
            maintenance_window_days: env::var("MAINTENANCE_WINDOW_DAYS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            weak_signal_threshold_dbm: env::var("WEAK_SIGNAL_THRESHOLD_DBM")
                .unwrap_or_else(|_| "-85".to_string())
                .parse()
                .unwrap_or(-85),

            // Read-side caps
            telemetry_default_limit: env::var("TELEMETRY_DEFAULT_LIMIT")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            alerts_default_limit: env::var("ALERTS_DEFAULT_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Rate limiting
            disable_rate_limiting: env::var("DISABLE_RATE_LIMITING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_read_per_second: env::var("RATE_LIMIT_READ_PER_SECOND")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            rate_limit_read_burst: env::var("RATE_LIMIT_READ_BURST")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            rate_limit_ingest_per_second: env::var("RATE_LIMIT_INGEST_PER_SECOND")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            rate_limit_ingest_burst: env::var("RATE_LIMIT_INGEST_BURST")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
