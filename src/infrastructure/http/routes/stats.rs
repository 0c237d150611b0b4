//! Statistics routes module
//!
//! This module contains the `/v1` API route configurations.

use crate::{
    application::use_cases::GetStatsUseCase,
    config::AppConfig,
    infrastructure::http::{
        handlers::{handle_pool_request, handle_user_request},
        processors::RequestPipeline,
        utils::{incoming_request, with_pipeline, with_stats_use_case},
    },
};
use std::sync::Arc;
use warp::Filter;

/// Statistics API routes configuration
pub struct StatsRoutes;

impl StatsRoutes {
    /// `GET /v1/pool`
    pub fn create_pool_route(
        config: &AppConfig,
        stats_use_case: Arc<GetStatsUseCase>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("v1" / "pool")
            .and(warp::get())
            .and(incoming_request(config.server.max_request_size as u64))
            .and(with_stats_use_case(stats_use_case))
            .and(with_pipeline(pipeline))
            .and_then(handle_pool_request)
    }

    /// `GET /v1/users/{address}`
    pub fn create_user_route(
        config: &AppConfig,
        stats_use_case: Arc<GetStatsUseCase>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("v1" / "users" / String)
            .and(warp::get())
            .and(incoming_request(config.server.max_request_size as u64))
            .and(with_stats_use_case(stats_use_case))
            .and(with_pipeline(pipeline))
            .and_then(handle_user_request)
    }
}
