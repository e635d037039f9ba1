use std::str::FromStr;
use std::time::Duration;

use leadgen_core::Timings;
use leadgen_engine::{ApiError, ApiSettings};
use log::LevelFilter;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("invalid API base url: {0}")]
    ApiBase(#[from] ApiError),
}

/// Host configuration, read from `LEADGEN_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub timings: Timings,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timings: Timings::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            log_destination: LogDestination::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base = lookup("LEADGEN_API_BASE").unwrap_or(defaults.api_base);
        let timings = Timings {
            poll_interval: millis(&lookup, "LEADGEN_POLL_INTERVAL_MS")?
                .unwrap_or(defaults.timings.poll_interval),
            discovery_error_display: millis(&lookup, "LEADGEN_DISCOVERY_ERROR_MS")?
                .unwrap_or(defaults.timings.discovery_error_display),
        };
        let connect_timeout =
            millis(&lookup, "LEADGEN_CONNECT_TIMEOUT_MS")?.unwrap_or(defaults.connect_timeout);
        let request_timeout =
            millis(&lookup, "LEADGEN_REQUEST_TIMEOUT_MS")?.unwrap_or(defaults.request_timeout);
        let log_destination = parsed(&lookup, "LEADGEN_LOG", "terminal, file or both")?
            .unwrap_or(defaults.log_destination);
        let log_level = parsed(&lookup, "LEADGEN_LOG_LEVEL", "a log level")?
            .unwrap_or(defaults.log_level);

        Ok(Self {
            api_base,
            timings,
            connect_timeout,
            request_timeout,
            log_destination,
            log_level,
        })
    }

    pub fn api_settings(&self) -> Result<ApiSettings, ConfigError> {
        let mut settings = ApiSettings::parse(&self.api_base)?;
        settings.connect_timeout = self.connect_timeout;
        settings.request_timeout = self.request_timeout;
        Ok(settings)
    }
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Some(Duration::from_millis(ms))),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            expected: "a positive number of milliseconds",
        }),
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected,
        })
}
