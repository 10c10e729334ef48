//! Service configuration, built from environment variables.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default base URL for the mail and classifier backends.
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
/// Default number of emails fetched per refresh cycle.
const DEFAULT_BATCH_SIZE: usize = 10;
/// Default pause between automatic refresh cycles.
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
/// Default timeout for each outbound backend request.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;
/// Default REST API listen port.
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Which audience the inbox is organized for.
///
/// Fixed at startup and injected into the API surface; there is no
/// runtime toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    School,
    College,
    Professional,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::College
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::School => write!(f, "school"),
            Self::College => write!(f, "college"),
            Self::Professional => write!(f, "professional"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(Self::School),
            "college" => Ok(Self::College),
            "professional" => Ok(Self::Professional),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the mail backend.
    pub mail_api_url: String,
    /// Base URL of the classifier backend.
    pub classifier_url: String,
    /// Emails fetched per refresh cycle. Always at least 1.
    pub batch_size: usize,
    /// Pause between automatic refresh cycles.
    pub refresh_interval: Duration,
    /// Timeout applied to every outbound backend request.
    pub http_timeout: Duration,
    /// Audience the inbox is organized for.
    pub role: UserRole,
    /// REST API listen port.
    pub http_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mail_api_url: DEFAULT_BACKEND_URL.to_string(),
            classifier_url: DEFAULT_BACKEND_URL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            role: UserRole::default(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Unset variables fall back to defaults; set-but-invalid values are
    /// rejected rather than silently defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mail_api_url = std::env::var("ZENBOX_MAIL_API_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        // The classifier usually lives on the same backend as the mail API.
        let classifier_url =
            std::env::var("ZENBOX_CLASSIFIER_URL").unwrap_or_else(|_| mail_api_url.clone());

        let batch_size: usize = env_parse("ZENBOX_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
        if batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ZENBOX_BATCH_SIZE".to_string(),
                message: "batch size must be at least 1".to_string(),
            });
        }

        let refresh_interval_secs: u64 =
            env_parse("ZENBOX_REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?;
        let http_timeout_secs: u64 =
            env_parse("ZENBOX_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let role: UserRole = env_parse("ZENBOX_ROLE", UserRole::default())?;
        let http_port: u16 = env_parse("ZENBOX_HTTP_PORT", DEFAULT_HTTP_PORT)?;

        Ok(Self {
            mail_api_url,
            classifier_url,
            batch_size,
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
            role,
            http_port,
        })
    }
}

/// Read and parse one environment variable, defaulting when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
