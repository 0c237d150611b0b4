//! Rate limiting middleware
//!
//! One token bucket shared by every route and every client. A request either
//! takes a token immediately or is rejected; nothing waits.

use crate::config::app_config::RateLimitConfig;
use crate::shared::error::{AppError, AppResult};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, info};

/// Global token bucket rate limiter
pub struct RateLimitMiddleware {
    limiter: DefaultDirectRateLimiter,
}

impl RateLimitMiddleware {
    /// Create a limiter replenishing `requests_per_second` tokens up to `burst_size`
    pub fn new(requests_per_second: f64, burst_size: u32) -> AppResult<Self> {
        if !(requests_per_second.is_finite() && requests_per_second > 0.0) {
            return Err(AppError::Config(format!(
                "Invalid rate limit: {} requests per second",
                requests_per_second
            )));
        }

        let burst = NonZeroU32::new(burst_size)
            .ok_or_else(|| AppError::Config("Rate limit burst size must be greater than 0".to_string()))?;

        let period = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .map_err(|e| AppError::Config(format!("Invalid rate limit period: {}", e)))?;
        let quota = Quota::with_period(period)
            .ok_or_else(|| AppError::Config("Rate limit replenish period is zero".to_string()))?
            .allow_burst(burst);

        Ok(Self {
            limiter: RateLimiter::direct(quota),
        })
    }

    /// Build the limiter if enabled in configuration
    pub fn from_config(config: &RateLimitConfig) -> AppResult<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let middleware = Self::new(config.requests_per_second, config.burst_size)?;
        info!(
            requests_per_second = config.requests_per_second,
            burst_size = config.burst_size,
            "Rate limiter enabled"
        );
        Ok(Some(middleware))
    }

    /// Take a token or fail with [`AppError::RateLimit`]
    pub fn check(&self) -> AppResult<()> {
        match self.limiter.check() {
            Ok(()) => Ok(()),
            Err(_) => {
                debug!("Rate limit exceeded");
                Err(AppError::RateLimit)
            }
        }
    }
}
