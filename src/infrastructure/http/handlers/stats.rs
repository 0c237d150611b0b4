//! Statistics handler module
//!
//! This module contains the `/v1` endpoint handlers for pool and user
//! statistics.

use crate::{
    application::use_cases::GetStatsUseCase,
    domain::is_valid_address,
    infrastructure::http::{
        models::{IncomingRequest, RequestContext},
        processors::{BaseRequestProcessor, RequestPipeline},
    },
    shared::error::AppError,
};
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};
use warp::reply::Response;

/// Handle pool statistics requests
pub async fn handle_pool_request(
    request: IncomingRequest,
    stats_use_case: Arc<GetStatsUseCase>,
    pipeline: RequestPipeline,
) -> Result<Response, warp::reject::Rejection> {
    let context = RequestContext::new(request.path.clone());
    let span = info_span!("request", request_id = %context.request_id, path = %context.path);

    let response = async {
        debug!("Processing pool stats request");
        BaseRequestProcessor::process(request, &context, &pipeline, || stats_use_case.pool_stats()).await
    }
    .instrument(span)
    .await;

    Ok(response)
}

/// Handle user statistics requests.
///
/// The address is validated before any other stage runs, so an invalid
/// address never consumes a rate limit token or touches the cache.
pub async fn handle_user_request(
    address: String,
    request: IncomingRequest,
    stats_use_case: Arc<GetStatsUseCase>,
    pipeline: RequestPipeline,
) -> Result<Response, warp::reject::Rejection> {
    let context = RequestContext::new(request.path.clone());
    let span = info_span!("request", request_id = %context.request_id, path = %context.path);

    let response = async {
        if !is_valid_address(&address) {
            let error = AppError::Validation("invalid user path or Bitcoin address".to_string());
            return BaseRequestProcessor::reject(&context, &error);
        }

        debug!(address = %address, "Processing user stats request");
        BaseRequestProcessor::process(request, &context, &pipeline, || {
            stats_use_case.user_stats(&address)
        })
        .await
    }
    .instrument(span)
    .await;

    Ok(response)
}
