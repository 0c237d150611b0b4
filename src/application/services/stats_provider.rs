//! Statistics provider port
//!
//! The HTTP layer only knows this trait; where the status files live is an
//! infrastructure concern.

use crate::domain::{ParseError, PoolStats, UserStats};
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce statistics
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Io { path, source } => AppError::Io {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            StatsError::Parse { path, source } => AppError::Parse {
                path: path.display().to_string(),
                source,
            },
        }
    }
}

/// Source of pool and per-user statistics
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Current pool-wide statistics
    async fn pool_stats(&self) -> Result<PoolStats, StatsError>;

    /// Current statistics for `username`, which the caller has already validated
    async fn user_stats(&self, username: &str) -> Result<UserStats, StatsError>;
}
