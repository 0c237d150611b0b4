//! HTTP responses module
//!
//! This module contains HTTP response formatting and utilities.

use crate::{infrastructure::adapters::CacheEntry, shared::error::AppError};
use serde::Serialize;
use tracing::error;
use warp::http::{header, HeaderValue, StatusCode};
use warp::reply::Response;
use warp::Reply;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Serialize a value as a 200 JSON response.
    ///
    /// Also returns the serialized body so the caller can cache it.
    pub fn json<T: Serialize>(value: &T) -> (Response, Option<Vec<u8>>) {
        match serde_json::to_vec(value) {
            Ok(body) => (
                Self::raw(StatusCode::OK, JSON_CONTENT_TYPE, body.clone()),
                Some(body),
            ),
            Err(e) => {
                let error = AppError::from(e);
                error!(error = %error, "Failed to serialize response");
                (Self::from_app_error(&error), None)
            }
        }
    }

    /// Format an application error as a JSON error body
    pub fn from_app_error(error: &AppError) -> Response {
        let body = error.to_error_body().to_string().into_bytes();
        Self::raw(error.http_status_code(), JSON_CONTENT_TYPE, body)
    }

    /// Replay a cached response as it was stored
    pub fn from_cache_entry(entry: &CacheEntry) -> Response {
        let status = StatusCode::from_u16(entry.status).unwrap_or(StatusCode::OK);
        Self::raw(status, &entry.content_type, entry.data.to_vec())
    }

    /// Response with an explicit status, content type and body
    pub fn raw(status: StatusCode, content_type: &str, body: Vec<u8>) -> Response {
        let mut response = body.into_response();
        *response.status_mut() = status;
        if let Ok(value) = HeaderValue::from_str(content_type) {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }
}
