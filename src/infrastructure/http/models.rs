//! HTTP models - Infrastructure concerns
//!
//! Request-scoped data carried through the processing pipeline.

use crate::{infrastructure::adapters::ProxyRequest, shared::logging::LoggingUtils};
use bytes::Bytes;
use std::net::SocketAddr;
use std::time::Instant;
use warp::http::{HeaderMap, Method};

/// An incoming request, kept whole so it can be forwarded upstream unchanged
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    /// Request path, without the query
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub remote_addr: Option<SocketAddr>,
}

impl IncomingRequest {
    /// Path plus `?query` when a query is present
    pub fn path_and_query(&self) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{}", self.path, query),
            _ => self.path.clone(),
        }
    }

    /// Convert into a request for the upstream node
    pub fn into_proxy_request(self) -> ProxyRequest {
        ProxyRequest {
            path_and_query: self.path_and_query(),
            method: self.method,
            headers: self.headers,
            body: self.body,
            remote_addr: self.remote_addr,
        }
    }
}

/// Per-request bookkeeping for logging
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID
    pub request_id: String,
    /// Request path, for logs
    pub path: String,
    /// When processing started
    pub started: Instant,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            request_id: LoggingUtils::generate_request_id(),
            path: path.into(),
            started: Instant::now(),
        }
    }

    /// Milliseconds since the request started
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}
