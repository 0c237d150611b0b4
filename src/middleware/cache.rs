//! Cache middleware for HTTP responses
//!
//! This module decides what gets cached and under which key. Storage lives in
//! [`CacheAdapter`].

use crate::config::AppConfig;
use crate::infrastructure::adapters::{CacheAdapter, CacheEntry};
use crate::shared::error::{AppError, AppResult};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Cache middleware for HTTP responses
pub struct CacheMiddleware {
    cache_adapter: Arc<CacheAdapter>,
}

impl CacheMiddleware {
    /// Create a new cache middleware.
    ///
    /// A zero TTL is a configuration error.
    pub fn new(ttl: Duration) -> AppResult<Self> {
        if ttl.is_zero() {
            return Err(AppError::Config(
                "cache TTL must be greater than 0 when caching is enabled".to_string(),
            ));
        }

        Ok(Self {
            cache_adapter: Arc::new(CacheAdapter::new(ttl)),
        })
    }

    /// Build the middleware if enabled in configuration
    pub fn from_config(config: &AppConfig) -> AppResult<Option<Self>> {
        if !config.cache.enabled {
            return Ok(None);
        }

        let middleware = Self::new(config.cache_ttl())?;
        info!(ttl_seconds = config.cache.ttl_seconds, "Cache store enabled");
        Ok(Some(middleware))
    }

    /// Only successful responses are cached
    pub fn should_cache_response(&self, status_code: u16) -> bool {
        status_code == 200
    }

    /// Cache key for a request: its path plus query string, if any
    pub fn generate_cache_key(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) if !query.is_empty() => format!("{}?{}", path, query),
            _ => path.to_string(),
        }
    }

    /// Get cached response
    pub async fn get_cached_response(&self, key: &str) -> Option<CacheEntry> {
        self.cache_adapter.get(key).await
    }

    /// Cache response
    pub async fn cache_response(&self, key: String, status: u16, content_type: &str, data: Bytes) {
        let entry = CacheEntry::new(key, status, content_type.to_string(), data);
        self.cache_adapter.set(entry).await;
    }

    /// Underlying store, shared with the expiry sweep
    pub fn adapter(&self) -> &Arc<CacheAdapter> {
        &self.cache_adapter
    }
}
