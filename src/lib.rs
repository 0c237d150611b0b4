//! ckpool dashboard - HTTP statistics for a ckpool mining pool
//!
//! This library reads the status files ckpool writes to its log directory and
//! serves them as JSON, with optional global rate limiting, response caching
//! and forwarding to another dashboard node.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

pub use config::AppConfig;
pub use infrastructure::http::HttpServer;
pub use shared::error::{AppError, AppResult};
