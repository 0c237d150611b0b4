//! Filesystem statistics adapter
//!
//! Reads the status files ckpool writes under its log directory:
//! `pool/pool.status` for the pool and `users/<address>` per user.

use crate::{
    application::services::{StatsError, StatsProvider},
    config::AppConfig,
    domain::{parse_pool_status, parse_user_status, PoolStats, UserStats},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Stats provider backed by ckpool's log directory
#[derive(Debug, Clone)]
pub struct FilesystemStatsProvider {
    log_dir: PathBuf,
}

impl FilesystemStatsProvider {
    /// Create a provider rooted at `log_dir`
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self { log_dir: log_dir.into() }
    }

    /// Create a provider from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.stats.log_dir.clone())
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the pool status artifact
    pub fn pool_status_path(&self) -> PathBuf {
        self.log_dir.join("pool").join("pool.status")
    }

    /// Path of a user's status artifact
    pub fn user_status_path(&self, username: &str) -> PathBuf {
        self.log_dir.join("users").join(username)
    }

    async fn read(path: &Path) -> Result<Vec<u8>, StatsError> {
        trace!(path = %path.display(), "Reading status file");
        tokio::fs::read(path).await.map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl StatsProvider for FilesystemStatsProvider {
    async fn pool_stats(&self) -> Result<PoolStats, StatsError> {
        let path = self.pool_status_path();
        let raw = Self::read(&path).await?;

        parse_pool_status(&raw).map_err(|source| StatsError::Parse { path, source })
    }

    async fn user_stats(&self, username: &str) -> Result<UserStats, StatsError> {
        let path = self.user_status_path(username);
        let raw = Self::read(&path).await?;

        parse_user_status(&raw).map_err(|source| StatsError::Parse { path, source })
    }
}
