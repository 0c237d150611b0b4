//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation. Everything checked here is a
//! startup failure: the server refuses to start rather than fail per request.

use crate::config::app_config::{LoggingConfig, ProxyConfig, RateLimitConfig, StatsConfig};
use crate::config::AppConfig;
use crate::shared::error::{AppError, AppResult};

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> AppResult<()> {
        config.listen_address()?;

        Self::validate_stats_config(&config.stats)?;
        Self::validate_rate_limit_config(&config.rate_limit)?;
        Self::validate_proxy_config(&config.proxy)?;
        Self::validate_logging_config(&config.logging)?;

        if config.proxy.enabled && config.cache.enabled {
            tracing::debug!("Caching and forwarding both enabled; forwarded responses are not cached");
        }

        Ok(())
    }

    /// Validate the status file location
    fn validate_stats_config(stats: &StatsConfig) -> AppResult<()> {
        if stats.log_dir.as_os_str().is_empty() {
            return Err(AppError::Config("stats.log_dir is not set".to_string()));
        }

        Ok(())
    }

    /// Validate rate limiting configuration
    fn validate_rate_limit_config(rate_limit: &RateLimitConfig) -> AppResult<()> {
        if rate_limit.enabled && !(rate_limit.requests_per_second.is_finite() && rate_limit.requests_per_second > 0.0) {
            return Err(AppError::Config(
                "Rate limiting enabled but requests_per_second is not positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the upstream target
    fn validate_proxy_config(proxy: &ProxyConfig) -> AppResult<()> {
        if !proxy.enabled {
            return Ok(());
        }

        if proxy.target_host_url.is_empty() {
            return Err(AppError::Config("proxy.target_host_url is not set".to_string()));
        }

        let url = reqwest::Url::parse(&proxy.target_host_url)
            .map_err(|e| AppError::Config(format!("Failed to parse target host URL: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Target host URL must use http or https, got {}",
                url.scheme()
            )));
        }

        if url.host_str().is_none() {
            return Err(AppError::Config("Target host URL has no host".to_string()));
        }

        Ok(())
    }

    /// Validate logging configuration
    fn validate_logging_config(logging: &LoggingConfig) -> AppResult<()> {
        if !["text", "json"].contains(&logging.format.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!("Invalid log format: {}", logging.format)));
        }

        Ok(())
    }
}
