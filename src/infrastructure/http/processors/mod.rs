//! HTTP request processors module
//!
//! This module contains the request processing chain shared by the
//! statistics endpoints.

pub mod base;

pub use base::{BaseRequestProcessor, RequestPipeline, ResponseSource};
