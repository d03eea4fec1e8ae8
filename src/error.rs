// src/error.rs

//! Unified error handling for the leaderboard client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Login or session failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport-level failure for a specific request
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// HTTP client failure outside a page request
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Markup or field shape mismatch
    #[error("Parse error in {field} ({raw:?}): {message}")]
    Parse {
        field: String,
        raw: String,
        message: String,
    },

    /// Typed API lookup failed
    #[error("API error: {0}")]
    Api(String),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a fetch error for the given URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error carrying the offending field and raw text.
    pub fn parse(
        field: impl Into<String>,
        raw: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::Parse {
            field: field.into(),
            raw: raw.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error for a required element that is missing.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::parse(field, "", "not found")
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was caused by markup that did not match expectations.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Whether this error came from the transport.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Http(_))
    }
}
