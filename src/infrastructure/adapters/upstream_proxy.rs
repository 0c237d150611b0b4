//! Upstream proxy adapter
//!
//! Forwards statistics requests to another dashboard node when this instance
//! runs without local ckpool files. Only the origin is rewritten; method,
//! path, query, headers and body pass through, and the upstream response is
//! relayed as received. Nothing is retried.

use crate::{
    config::app_config::ProxyConfig,
    shared::error::{AppError, AppResult},
};
use bytes::Bytes;
use reqwest::{Client, Url};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument};
use warp::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use warp::Reply;

/// Headers that only apply to a single connection
const HOP_BY_HOP_HEADERS: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// A request as received from the client
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Path plus optional `?query`
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub remote_addr: Option<SocketAddr>,
}

/// The upstream's answer, relayed verbatim
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxyResponse {
    /// Convert into a reply for the client
    pub fn into_reply(self) -> warp::reply::Response {
        let mut response = self.body.to_vec().into_response();
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Reverse proxy to a single upstream origin
pub struct UpstreamProxy {
    client: Client,
    target: Url,
    host: String,
    connection_permits: Arc<Semaphore>,
}

impl UpstreamProxy {
    /// Create a proxy from configuration.
    ///
    /// Fails if the target URL is malformed, which aborts startup.
    pub fn new(config: &ProxyConfig) -> AppResult<Self> {
        let target = Url::parse(&config.target_host_url)
            .map_err(|e| AppError::Config(format!("Failed to parse target host URL: {}", e)))?;
        let host = match (target.host_str(), target.port_or_known_default()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(AppError::Config(format!(
                    "Target host URL has no host: {}",
                    config.target_host_url
                )))
            }
        };

        // Only one upstream host, so the per-host idle cap is also the total
        let max_idle = config.max_idle_connections.min(config.max_connections_per_host);

        let client = Client::builder()
            .pool_max_idle_per_host(max_idle)
            .pool_idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .tcp_keepalive(Duration::from_secs(config.keepalive_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            target_host_url = %config.target_host_url,
            max_idle_connections = max_idle,
            max_connections_per_host = config.max_connections_per_host,
            "Reverse proxy enabled"
        );

        Ok(Self {
            client,
            target,
            host,
            connection_permits: Arc::new(Semaphore::new(config.max_connections_per_host)),
        })
    }

    /// Upstream host and port, used in logs
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the upstream URL for an incoming path and query
    pub fn upstream_url(&self, path_and_query: &str) -> AppResult<Url> {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };

        let base = self.target.path().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };

        let mut url = self.target.clone();
        url.set_path(&joined);
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// Forward a request and relay the upstream response
    #[instrument(skip(self, request), fields(upstream = %self.host, method = %request.method, path = %request.path_and_query))]
    pub async fn forward(&self, request: ProxyRequest) -> AppResult<ProxyResponse> {
        let url = self.upstream_url(&request.path_and_query)?;
        let headers = Self::outbound_headers(&request.headers, request.remote_addr);

        let _permit = self
            .connection_permits
            .acquire()
            .await
            .map_err(|e| AppError::Internal(format!("Proxy connection pool closed: {}", e)))?;

        debug!(url = %url, "Forwarding request upstream");

        let response = self
            .client
            .request(request.method, url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let headers = Self::strip_hop_by_hop(response.headers());
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        debug!(status = status.as_u16(), bytes = body.len(), "Upstream responded");

        Ok(ProxyResponse { status, headers, body })
    }

    fn map_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            error!(upstream = %self.host, error = %err, "Upstream request timed out");
            AppError::ProxyTimeout { host: self.host.clone() }
        } else {
            error!(upstream = %self.host, error = %err, "Upstream request failed");
            AppError::ProxyUnavailable {
                host: self.host.clone(),
                reason: err.to_string(),
            }
        }
    }

    /// Client headers minus hop-by-hop headers, `Host` and `Content-Length`,
    /// which the client recomputes for the upstream connection
    fn outbound_headers(incoming: &HeaderMap, remote_addr: Option<SocketAddr>) -> HeaderMap {
        let mut headers = Self::strip_hop_by_hop(incoming);
        headers.remove(header::HOST);
        headers.remove(header::CONTENT_LENGTH);

        if let Some(addr) = remote_addr {
            let forwarded_for = match incoming
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
            {
                Some(prior) => format!("{}, {}", prior, addr.ip()),
                None => addr.ip().to_string(),
            };
            if let Ok(value) = HeaderValue::from_str(&forwarded_for) {
                headers.insert(HeaderName::from_static("x-forwarded-for"), value);
            }
        }

        headers
    }

    fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
        let mut stripped = headers.clone();

        // Headers named in Connection are hop-by-hop too
        let listed: Vec<String> = headers
            .get_all(header::CONNECTION)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        for name in HOP_BY_HOP_HEADERS.iter().copied().map(String::from).chain(listed) {
            stripped.remove(name.as_str());
        }

        stripped
    }
}
