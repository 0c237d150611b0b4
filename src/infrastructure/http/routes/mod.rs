//! HTTP routes module
//!
//! This module contains all HTTP route configurations.

pub mod builder;
pub mod pages;
pub mod stats;

// Re-export commonly used types
pub use builder::RouteBuilder;
pub use pages::PageRoutes;
pub use stats::StatsRoutes;
