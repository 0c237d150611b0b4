//! Request middleware
//!
//! The optional stages applied in front of the statistics handlers: the global
//! rate limiter and the response cache.

pub mod cache;
pub mod rate_limit;

pub use cache::CacheMiddleware;
pub use rate_limit::RateLimitMiddleware;
