//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use crate::config::app_config::LoggingConfig;
use crate::shared::error::{AppError, AppResult};
use tracing::{debug, info};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize the global subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn initialize(config: &LoggingConfig) -> AppResult<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if config.format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

        debug!(level = %config.level, format = %config.format, "Logger initialized");
        Ok(())
    }

    /// Log a completed request
    pub fn log_response(request_id: &str, path: &str, status: u16, source: &str, duration_ms: u128) {
        info!(
            request_id = %request_id,
            path = %path,
            status = status,
            source = source,
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}
