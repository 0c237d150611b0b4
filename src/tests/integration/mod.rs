//! Integration tests for the HTTP routes
//!
//! These drive the complete filter tree built by [`HttpServer::routes`],
//! with either real status files in a temp directory or a provider double.

mod stats;

use crate::{
    config::AppConfig,
    infrastructure::http::server::HttpServer,
    tests::{config, fixtures::StaticStatsProvider},
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use warp::http::Response;
use warp::{Filter, Reply};

/// Build the routes for `config` with a provider double
pub fn routes_with_provider(
    config: AppConfig,
    provider: Arc<StaticStatsProvider>,
) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    config::init();
    HttpServer::with_provider(config, provider)
        .expect("failed to build server")
        .routes()
}

/// Build the routes for `config`, reading from its log directory
pub fn routes_from_disk(config: AppConfig) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    config::init();
    HttpServer::new(config).expect("failed to build server").routes()
}

/// Parse a response body as JSON
pub fn json_body(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).expect("response body is not JSON")
}

/// Assert the standard error body
pub fn assert_error_body(response: &Response<Bytes>, code: u16) {
    assert_eq!(response.status().as_u16(), code);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body = json_body(response);
    assert_eq!(body["error"]["code"], code);
    assert!(body["error"]["message"].is_string());
}
