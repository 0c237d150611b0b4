//! Route builder module
//!
//! This module contains the main route builder that orchestrates the creation
//! of all application routes.

use crate::{
    application::use_cases::GetStatsUseCase,
    config::AppConfig,
    infrastructure::http::{
        processors::RequestPipeline,
        routes::{PageRoutes, StatsRoutes},
    },
};
use std::sync::Arc;
use warp::Filter;

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes
    pub fn build_routes(
        config: &AppConfig,
        stats_use_case: Arc<GetStatsUseCase>,
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let pool_route = StatsRoutes::create_pool_route(config, stats_use_case.clone(), pipeline.clone());
        let user_route = StatsRoutes::create_user_route(config, stats_use_case, pipeline.clone());

        let index_route = PageRoutes::create_index_route(pipeline.clone());
        let user_page_route = PageRoutes::create_user_page_route(pipeline.clone());
        let static_route = PageRoutes::create_static_route(pipeline);

        // Combine all routes
        pool_route
            .or(user_route)
            .or(index_route)
            .or(user_page_route)
            .or(static_route)
    }
}
