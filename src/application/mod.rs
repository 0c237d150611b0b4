//! Application layer - Use cases and application services
//!
//! This module contains the statistics port and the use cases that the HTTP
//! handlers call into.

pub mod services;
pub mod use_cases;

pub use services::*;
pub use use_cases::*;
