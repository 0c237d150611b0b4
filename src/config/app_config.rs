//! Application configuration structures
//!
//! This module contains the main configuration structures for the application.
//! Values are layered: built-in defaults, then the TOML config file, then
//! `CKDASH_*` environment variables (`__` separates nested keys, e.g.
//! `CKDASH_CACHE__TTL_SECONDS=30`).

use crate::shared::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CKDASH";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Address to listen on, e.g. "[::]:8080"
    #[validate(length(min = 1))]
    pub listen_address: String,

    /// Time allowed for in-flight requests to finish on shutdown
    #[validate(range(min = 1, max = 300))]
    pub shutdown_grace_seconds: u64,

    /// Maximum request body size in bytes
    #[validate(range(min = 1024, max = 10485760))] // 1KB to 10MB
    pub max_request_size: usize,
}

/// Location of ckpool's status files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// ckpool log directory containing `pool/pool.status` and `users/`
    pub log_dir: PathBuf,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    pub enabled: bool,

    /// Tokens replenished per second, shared by all clients
    #[validate(range(min = 0.001, max = 100000.0))]
    pub requests_per_second: f64,

    /// Burst size
    #[validate(range(min = 1, max = 100000))]
    pub burst_size: u32,
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CacheConfig {
    /// Enable caching
    pub enabled: bool,

    /// Time to live applied to every cached response
    #[validate(range(min = 1, max = 86400))]
    pub ttl_seconds: u64,
}

/// Upstream forwarding configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProxyConfig {
    /// Forward statistics requests instead of serving them locally
    pub enabled: bool,

    /// Upstream origin, e.g. "http://main.maxhash.io:8080"
    #[validate(url)]
    pub target_host_url: String,

    /// Idle connections kept open to the upstream
    #[validate(range(min = 1, max = 10000))]
    pub max_idle_connections: usize,

    /// Concurrent connections to the upstream
    #[validate(range(min = 1, max = 10000))]
    pub max_connections_per_host: usize,

    /// Idle connection timeout in seconds
    #[validate(range(min = 1, max = 3600))]
    pub idle_timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub connect_timeout_seconds: u64,

    /// TCP keep-alive interval in seconds
    #[validate(range(min = 1, max = 3600))]
    pub keepalive_seconds: u64,

    /// Whole request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format (text, json)
    #[validate(length(min = 1))]
    pub format: String,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Status file location
    pub stats: StatsConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Upstream forwarding configuration
    pub proxy: ProxyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                listen_address: "[::]:8080".to_string(),
                shutdown_grace_seconds: 15,
                max_request_size: 1024 * 1024, // 1MB
            },
            stats: StatsConfig {
                log_dir: PathBuf::from("/var/log/ckpool"),
            },
            rate_limit: RateLimitConfig {
                enabled: false,
                requests_per_second: 5.0,
                burst_size: 10,
            },
            cache: CacheConfig {
                enabled: true,
                ttl_seconds: 60,
            },
            proxy: ProxyConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_host_url: "http://main.maxhash.io:8080".to_string(),
            max_idle_connections: 1000,
            max_connections_per_host: 100,
            idle_timeout_seconds: 60,
            connect_timeout_seconds: 5,
            keepalive_seconds: 30,
            request_timeout_seconds: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and environment variables
    pub fn load(path: &Path) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()?;

        Ok(config)
    }

    /// Write the default configuration to `path` if nothing exists there yet.
    ///
    /// Returns true when a file was written.
    pub fn write_default_if_missing(path: &Path) -> AppResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        let contents = toml::to_string_pretty(&AppConfig::default())?;
        std::fs::write(path, contents).map_err(|e| {
            AppError::Config(format!("Failed to write default config to {}: {}", path.display(), e))
        })?;

        Ok(true)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> AppResult<()> {
        self.server.validate()?;
        self.rate_limit.validate()?;
        self.cache.validate()?;
        self.proxy.validate()?;
        self.logging.validate()?;

        crate::config::ConfigValidator::validate_config(self)
    }

    /// Parsed listen address
    pub fn listen_address(&self) -> AppResult<SocketAddr> {
        self.server
            .listen_address
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid listen address {}: {}", self.server.listen_address, e)))
    }

    /// Cache TTL as a duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_seconds)
    }

    /// Shutdown grace period as a duration
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_grace_seconds)
    }
}
