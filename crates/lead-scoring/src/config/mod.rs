use crate::scoring::{MlServiceConfig, ScoringConfig, ScoringWeights, WeightsError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: load_scoring()?,
        })
    }
}

fn load_scoring() -> Result<ScoringConfig, ConfigError> {
    let defaults = ScoringWeights::default();
    let weights = ScoringWeights::new(
        parse_var("SCORING_WEIGHT_DEMOGRAPHIC", defaults.demographic)?,
        parse_var("SCORING_WEIGHT_BEHAVIORAL", defaults.behavioral)?,
        parse_var("SCORING_WEIGHT_FIRMOGRAPHIC", defaults.firmographic)?,
        parse_var("SCORING_WEIGHT_ENGAGEMENT", defaults.engagement)?,
    )
    .map_err(|source| ConfigError::InvalidWeights { source })?;

    let ml_service = match non_blank_var("ML_SERVICE_URL") {
        Some(base_url) => {
            let api_key = non_blank_var("ML_API_KEY").ok_or(ConfigError::MissingMlApiKey)?;
            let mut ml = MlServiceConfig::new(base_url, api_key);
            ml.timeout = timeout_var("ML_TIMEOUT_SECS", ml.timeout)?;
            ml.batch_timeout = timeout_var("ML_BATCH_TIMEOUT_SECS", ml.batch_timeout)?;
            Some(ml)
        }
        None => None,
    };

    Ok(ScoringConfig {
        weights,
        ml_service,
    })
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_blank_var(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

fn timeout_var(key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match parse_var(key, default.as_secs())? {
        0 => Err(ConfigError::InvalidTimeout { key }),
        secs => Ok(Duration::from_secs(secs)),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    InvalidWeights { source: WeightsError },
    InvalidTimeout { key: &'static str },
    MissingMlApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be numeric, got '{value}'")
            }
            ConfigError::InvalidWeights { source } => {
                write!(f, "SCORING_WEIGHT_* values are invalid: {source}")
            }
            ConfigError::InvalidTimeout { key } => {
                write!(f, "{key} must be at least one second")
            }
            ConfigError::MissingMlApiKey => {
                write!(f, "ML_API_KEY is required when ML_SERVICE_URL is set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeights { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::MissingMlApiKey => None,
        }
    }
}
