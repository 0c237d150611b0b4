//! Application services - Ports the use cases depend on

pub mod stats_provider;

pub use stats_provider::{StatsError, StatsProvider};
