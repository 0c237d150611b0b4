//! Infrastructure adapters module
//!
//! This module contains adapters for the filesystem, the response cache and
//! the upstream dashboard node.

pub mod cache;
pub mod filesystem_stats;
pub mod upstream_proxy;

pub use cache::{CacheAdapter, CacheEntry};
pub use filesystem_stats::FilesystemStatsProvider;
pub use upstream_proxy::{ProxyRequest, ProxyResponse, UpstreamProxy};
