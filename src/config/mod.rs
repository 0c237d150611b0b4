//! Configuration management module
//!
//! Layered loading (defaults, TOML file, `CKDASH_*` environment), section
//! validation and the startup checks that refuse a bad configuration.

pub mod app_config;
pub mod validation;

pub use app_config::{
    AppConfig, CacheConfig, LoggingConfig, ProxyConfig, RateLimitConfig, ServerConfig, StatsConfig,
};
pub use validation::ConfigValidator;
