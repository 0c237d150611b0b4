//! HTTP route handlers module
//!
//! This module contains the route handlers, split into the statistics API and
//! the embedded pages.

pub mod pages;
pub mod stats;

pub use pages::{handle_index_page, handle_static_asset, handle_user_page};
pub use stats::{handle_pool_request, handle_user_request};
