//! Page routes module
//!
//! This module contains the routes for the embedded dashboard pages.

use crate::infrastructure::http::{
    handlers::{handle_index_page, handle_static_asset, handle_user_page},
    processors::RequestPipeline,
    utils::with_pipeline,
};
use warp::Filter;

/// Dashboard page routes configuration
pub struct PageRoutes;

impl PageRoutes {
    /// `GET /`
    pub fn create_index_route(
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path::end()
            .and(warp::get())
            .and(with_pipeline(pipeline))
            .and_then(handle_index_page)
    }

    /// `GET /users/{address}`
    pub fn create_user_page_route(
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path!("users" / String)
            .and(warp::get())
            .and(with_pipeline(pipeline))
            .and_then(handle_user_page)
    }

    /// `GET /static/{file}`
    pub fn create_static_route(
        pipeline: RequestPipeline,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path("static")
            .and(warp::get())
            .and(warp::path::tail())
            .and(with_pipeline(pipeline))
            .and_then(handle_static_asset)
    }
}
