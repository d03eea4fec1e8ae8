//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::PageSelectors;

/// Largest page size the leaderboard pages honor. The API accepts more.
pub const MAX_PER_PAGE: u32 = 100;

/// Highest request rate a nanosecond-resolution timer can space out.
pub const MAX_QPS_LIMIT: u32 = 1_000_000_000;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and throttling settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Leaderboard page markup selectors
    #[serde(default)]
    pub selectors: PageSelectors,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.client.validate()
    }
}

/// HTTP client and request throttling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Site root for login and leaderboard pages
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Root of the typed API
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Requests per second across API and page fetches (0 disables)
    #[serde(default = "defaults::qps_limit")]
    pub qps_limit: u32,

    /// Entries requested per leaderboard page
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_base_url: defaults::api_base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            qps_limit: defaults::qps_limit(),
            per_page: defaults::per_page(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(AppError::validation(format!(
                "client.per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        if self.qps_limit > MAX_QPS_LIMIT {
            return Err(AppError::validation(format!(
                "client.qps_limit must be at most {MAX_QPS_LIMIT}"
            )));
        }
        Url::parse(&self.base_url)?;
        Url::parse(&self.api_base_url)?;
        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Login credentials and the optional API access token.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub access_token: Option<String>,
}

mod defaults {
    use super::MAX_PER_PAGE;

    pub fn base_url() -> String {
        "https://www.strava.com".into()
    }
    pub fn api_base_url() -> String {
        "https://www.strava.com/api/v3".into()
    }
    pub fn user_agent() -> String {
        concat!("stravax/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn qps_limit() -> u32 {
        10
    }
    pub fn per_page() -> u32 {
        MAX_PER_PAGE
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
