//! HTTP utilities - Common helper functions
//!
//! This module contains the filters used to inject shared state into routes
//! and to capture an incoming request whole.

use crate::application::use_cases::GetStatsUseCase;
use crate::infrastructure::http::{models::IncomingRequest, processors::RequestPipeline};
use bytes::Bytes;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use warp::http::{HeaderMap, Method};
use warp::path::FullPath;
use warp::Filter;

/// Helper function to inject the stats use case into route
pub fn with_stats_use_case(
    stats_use_case: Arc<GetStatsUseCase>,
) -> impl Filter<Extract = (Arc<GetStatsUseCase>,), Error = Infallible> + Clone {
    warp::any().map(move || stats_use_case.clone())
}

/// Helper function to inject the middleware pipeline into route
pub fn with_pipeline(
    pipeline: RequestPipeline,
) -> impl Filter<Extract = (RequestPipeline,), Error = Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}

/// Raw query string, or `None` when the request has none
pub fn optional_raw_query() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Clone {
    warp::query::raw()
        .map(Some)
        .or(warp::any().map(|| None))
        .unify()
}

/// Request body of at most `limit` bytes.
///
/// A declared length over the limit is refused with 413. A request with no
/// `Content-Length` and no `Transfer-Encoding` has an empty body; a chunked
/// body without a declared length is refused with 411.
pub fn bounded_body(limit: u64) -> impl Filter<Extract = (Bytes,), Error = warp::Rejection> + Clone {
    let sized = warp::body::content_length_limit(limit).and(warp::body::bytes());
    let empty = warp::header::headers_cloned().and_then(|headers: HeaderMap| async move {
        if headers.contains_key(CONTENT_LENGTH) || headers.contains_key(TRANSFER_ENCODING) {
            Err(warp::reject())
        } else {
            Ok(Bytes::new())
        }
    });

    sized.or(empty).unify()
}

/// Capture everything needed to serve or forward a request
pub fn incoming_request(
    max_request_size: u64,
) -> impl Filter<Extract = (IncomingRequest,), Error = warp::Rejection> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(optional_raw_query())
        .and(warp::header::headers_cloned())
        .and(bounded_body(max_request_size))
        .and(warp::addr::remote())
        .map(
            |method: Method,
             path: FullPath,
             query: Option<String>,
             headers: HeaderMap,
             body: Bytes,
             remote_addr: Option<SocketAddr>| IncomingRequest {
                method,
                path: path.as_str().to_string(),
                query,
                headers,
                body,
                remote_addr,
            },
        )
}
