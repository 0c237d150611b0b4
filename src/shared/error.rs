//! Error handling module
//!
//! This module provides centralized error handling for the application.
//! Every failure is turned into an HTTP response at the router boundary using
//! [`AppError::http_status_code`] and [`AppError::to_error_body`].

use crate::domain::ParseError;
use serde_json::Value;
use thiserror::Error;
use warp::http::StatusCode;

/// Application error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse {path}: {source}")]
    Parse { path: String, source: ParseError },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Upstream {host} unavailable: {reason}")]
    ProxyUnavailable { host: String, reason: String },

    #[error("Upstream {host} timed out")]
    ProxyTimeout { host: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ProxyUnavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::ProxyTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Io { .. }
            | AppError::Parse { .. }
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to clients.
    ///
    /// Filesystem paths and upstream hosts stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(what) => format!("{} not found", what),
            AppError::RateLimit => "Rate limit exceeded. Slow down!".to_string(),
            AppError::Io { .. } | AppError::Parse { .. } => "failed to get stats".to_string(),
            AppError::ProxyUnavailable { .. } => "upstream unavailable".to_string(),
            AppError::ProxyTimeout { .. } => "upstream timed out".to_string(),
            AppError::Config(_) | AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    /// JSON error body returned to clients
    pub fn to_error_body(&self) -> Value {
        serde_json::json!({
            "error": {
                "code": self.http_status_code().as_u16(),
                "message": self.client_message()
            }
        })
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Configuration validation failed: {}", err))
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(format!("Failed to serialize configuration: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("I/O error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let host = err
            .url()
            .and_then(|url| url.host_str())
            .unwrap_or("upstream")
            .to_string();
        if err.is_timeout() {
            AppError::ProxyTimeout { host }
        } else {
            AppError::ProxyUnavailable { host, reason: err.to_string() }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON serialization error: {}", err))
    }
}
