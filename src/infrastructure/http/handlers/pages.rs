//! Page handler module
//!
//! Serves the embedded dashboard pages and static files. Only the rate
//! limiter applies here.

use crate::{
    infrastructure::http::{
        assets::{self, EmbeddedAsset},
        processors::{BaseRequestProcessor, RequestPipeline},
        responses::ResponseFormatter,
    },
    shared::error::AppError,
};
use tracing::debug;
use warp::http::StatusCode;
use warp::path::Tail;
use warp::reply::Response;

fn asset_response(asset: EmbeddedAsset) -> Response {
    ResponseFormatter::raw(StatusCode::OK, asset.content_type, asset.body.as_bytes().to_vec())
}

fn serve(asset: EmbeddedAsset, pipeline: &RequestPipeline) -> Response {
    match BaseRequestProcessor::check_rate_limit(pipeline) {
        Ok(()) => asset_response(asset),
        Err(response) => response,
    }
}

/// Handle the pool overview page
pub async fn handle_index_page(pipeline: RequestPipeline) -> Result<Response, warp::reject::Rejection> {
    Ok(serve(assets::index_page(), &pipeline))
}

/// Handle a miner's page; the address is checked by the page's API call
pub async fn handle_user_page(
    _address: String,
    pipeline: RequestPipeline,
) -> Result<Response, warp::reject::Rejection> {
    Ok(serve(assets::user_page(), &pipeline))
}

/// Handle `/static/<name>`
pub async fn handle_static_asset(
    tail: Tail,
    pipeline: RequestPipeline,
) -> Result<Response, warp::reject::Rejection> {
    if let Err(response) = BaseRequestProcessor::check_rate_limit(&pipeline) {
        return Ok(response);
    }

    match assets::static_asset(tail.as_str()) {
        Some(asset) => Ok(asset_response(asset)),
        None => {
            debug!(name = %tail.as_str(), "Unknown static asset");
            let error = AppError::NotFound(format!("static asset {}", tail.as_str()));
            Ok(ResponseFormatter::from_app_error(&error))
        }
    }
}
