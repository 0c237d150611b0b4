//! Statistics use case

use crate::{
    application::services::StatsProvider,
    domain::{PoolStats, UserStats},
    shared::error::{AppError, AppResult},
};
use std::sync::Arc;
use tracing::{debug, error};

/// Serve statistics from the local stats provider
pub struct GetStatsUseCase {
    provider: Arc<dyn StatsProvider>,
}

impl GetStatsUseCase {
    /// Create a new statistics use case
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self { provider }
    }

    /// Pool-wide statistics
    pub async fn pool_stats(&self) -> AppResult<PoolStats> {
        match self.provider.pool_stats().await {
            Ok(stats) => {
                debug!(users = stats.users, workers = stats.workers, "Loaded pool stats");
                Ok(stats)
            }
            Err(e) => {
                let error = AppError::from(e);
                error!(error = %error, "Error getting pool stats");
                Err(error)
            }
        }
    }

    /// Statistics for a single, already validated, address
    pub async fn user_stats(&self, username: &str) -> AppResult<UserStats> {
        match self.provider.user_stats(username).await {
            Ok(stats) => {
                debug!(username = %username, workers = stats.workers_detail.len(), "Loaded user stats");
                Ok(stats)
            }
            Err(e) => {
                let error = AppError::from(e);
                error!(username = %username, error = %error, "Error getting user stats");
                Err(error)
            }
        }
    }
}
