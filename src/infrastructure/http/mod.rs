//! HTTP infrastructure module
//!
//! This module contains HTTP-related concerns including request models,
//! server implementation, routes, utilities, responses, handlers, processors
//! and the embedded pages.

pub mod assets;
pub mod handlers;
pub mod models;
pub mod processors;
pub mod responses;
pub mod routes;
pub mod server;
pub mod utils;

pub use models::{IncomingRequest, RequestContext};
pub use processors::{BaseRequestProcessor, RequestPipeline};
pub use responses::ResponseFormatter;
pub use server::HttpServer;
