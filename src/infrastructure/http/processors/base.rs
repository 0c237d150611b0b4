//! Base request processor module
//!
//! This module contains the processing chain shared by the statistics
//! endpoints: rate limit, cache lookup, then either the upstream proxy or the
//! local stats provider, then cache store.

use crate::{
    infrastructure::{
        adapters::UpstreamProxy,
        http::{
            models::{IncomingRequest, RequestContext},
            responses::{ResponseFormatter, JSON_CONTENT_TYPE},
        },
    },
    middleware::{cache::CacheMiddleware, rate_limit::RateLimitMiddleware},
    shared::{
        error::{AppError, AppResult},
        logging::LoggingUtils,
    },
};
use bytes::Bytes;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};
use warp::reply::Response;

/// The optional stages in front of the statistics handlers
#[derive(Clone, Default)]
pub struct RequestPipeline {
    pub rate_limit: Option<Arc<RateLimitMiddleware>>,
    pub cache: Option<Arc<CacheMiddleware>>,
    pub proxy: Option<Arc<UpstreamProxy>>,
}

/// Where a response came from, for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Rejected,
    Cache,
    Proxy,
    Local,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSource::Rejected => "rejected",
            ResponseSource::Cache => "cache",
            ResponseSource::Proxy => "proxy",
            ResponseSource::Local => "local",
        }
    }
}

/// Base request processor that handles common processing patterns
pub struct BaseRequestProcessor;

impl BaseRequestProcessor {
    /// Run the stats chain for an already validated request
    pub async fn process<T, F, Fut>(
        request: IncomingRequest,
        context: &RequestContext,
        pipeline: &RequestPipeline,
        load: F,
    ) -> Response
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Err(response) = Self::check_rate_limit(pipeline) {
            return Self::finish(context, response, ResponseSource::Rejected);
        }

        let cache_key = pipeline
            .cache
            .as_ref()
            .map(|cache| cache.generate_cache_key(&request.path, request.query.as_deref()));

        if let (Some(cache), Some(key)) = (&pipeline.cache, &cache_key) {
            if let Some(response) = Self::check_cache(cache, key).await {
                return Self::finish(context, response, ResponseSource::Cache);
            }
        }

        if let Some(proxy) = &pipeline.proxy {
            let response = match proxy.forward(request.into_proxy_request()).await {
                Ok(upstream) => upstream.into_reply(),
                Err(e) => ResponseFormatter::from_app_error(&e),
            };
            return Self::finish(context, response, ResponseSource::Proxy);
        }

        let response = match load().await {
            Ok(stats) => {
                let (response, body) = ResponseFormatter::json(&stats);
                if let (Some(cache), Some(key), Some(body)) = (&pipeline.cache, cache_key, body) {
                    Self::cache_response(cache, key, response.status().as_u16(), body).await;
                }
                response
            }
            Err(e) => ResponseFormatter::from_app_error(&e),
        };

        Self::finish(context, response, ResponseSource::Local)
    }

    /// Check rate limit and return error response if rate limit is exceeded
    pub fn check_rate_limit(pipeline: &RequestPipeline) -> Result<(), Response> {
        match &pipeline.rate_limit {
            Some(limiter) => limiter
                .check()
                .map_err(|e| ResponseFormatter::from_app_error(&e)),
            None => Ok(()),
        }
    }

    /// Return the cached response if a live entry exists
    pub async fn check_cache(cache: &CacheMiddleware, key: &str) -> Option<Response> {
        let entry = cache.get_cached_response(key).await?;
        debug!(key = %key, "Cache hit - returning cached response");
        Some(ResponseFormatter::from_cache_entry(&entry))
    }

    /// Cache a locally produced response if its status is cacheable
    pub async fn cache_response(cache: &CacheMiddleware, key: String, status: u16, body: Vec<u8>) {
        if !cache.should_cache_response(status) {
            return;
        }
        cache
            .cache_response(key, status, JSON_CONTENT_TYPE, Bytes::from(body))
            .await;
    }

    /// Log the outcome and hand the response back
    pub fn finish(context: &RequestContext, response: Response, source: ResponseSource) -> Response {
        LoggingUtils::log_response(
            &context.request_id,
            &context.path,
            response.status().as_u16(),
            source.as_str(),
            context.elapsed_ms(),
        );
        response
    }

    /// Log a rejected request and build its response
    pub fn reject(context: &RequestContext, error: &AppError) -> Response {
        info!(request_id = %context.request_id, error = %error, "Rejecting request");
        Self::finish(context, ResponseFormatter::from_app_error(error), ResponseSource::Rejected)
    }
}
