//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the filesystem, cache and proxy adapters and the
//! HTTP server.

pub mod adapters;
pub mod http;

pub use adapters::{CacheAdapter, FilesystemStatsProvider, UpstreamProxy};
