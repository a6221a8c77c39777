//! Application configuration structs
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub push: PushConfig,
    pub sweep: SweepConfig,
    pub feed: FeedConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Push gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Gateway send endpoint
    pub endpoint: String,
    /// Bearer key presented to the gateway
    pub api_key: String,
    #[serde(default = "default_push_timeout_secs")]
    pub timeout_secs: u64,
}

impl PushConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Cleanup sweep schedule
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,
    /// Label of the zone the original cron ran in; the sweep itself
    /// compares UTC instants, so this only documents the cadence origin
    #[serde(default = "default_sweep_timezone")]
    pub timezone: String,
}

impl SweepConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Change feed (LISTEN/NOTIFY) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_channel")]
    pub channel: String,
    #[serde(default = "default_feed_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl FeedConfig {
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

// Default value functions
fn default_app_name() -> String {
    "rally-worker".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_push_timeout_secs() -> u64 {
    10
}

fn default_sweep_interval_secs() -> u64 {
    3600 // hourly
}

fn default_sweep_timezone() -> String {
    "Europe/Madrid".to_string()
}

fn default_feed_channel() -> String {
    "document_events".to_string()
}

fn default_feed_reconnect_delay_ms() -> u64 {
    1000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            push: PushConfig {
                endpoint: env::var("PUSH_GATEWAY_URL")
                    .map_err(|_| ConfigError::MissingVar("PUSH_GATEWAY_URL"))?,
                api_key: env::var("PUSH_GATEWAY_KEY")
                    .map_err(|_| ConfigError::MissingVar("PUSH_GATEWAY_KEY"))?,
                timeout_secs: parse_env("PUSH_TIMEOUT_SECS")?
                    .unwrap_or_else(default_push_timeout_secs),
            },
            sweep: SweepConfig {
                interval_secs: parse_env("SWEEP_INTERVAL_SECS")?
                    .unwrap_or_else(default_sweep_interval_secs),
                timezone: env::var("SWEEP_TIMEZONE").unwrap_or_else(|_| default_sweep_timezone()),
            },
            feed: FeedConfig {
                channel: env::var("FEED_CHANNEL").unwrap_or_else(|_| default_feed_channel()),
                reconnect_delay_ms: parse_env("FEED_RECONNECT_DELAY_MS")?
                    .unwrap_or_else(default_feed_reconnect_delay_ms),
            },
        })
    }
}

/// Parse an optional numeric environment variable, rejecting malformed values
fn parse_env<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    parse_value(name, env::var(name).ok())
}

fn parse_value<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match raw {
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, s)),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
