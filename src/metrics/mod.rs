//! Per-step aggregation of request outcomes.
mod summary;


pub use summary::{ErrorRate, LatencyStats, StepSummary};
