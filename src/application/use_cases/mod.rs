//! Application use cases

pub mod stats;

pub use stats::GetStatsUseCase;
