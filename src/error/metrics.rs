use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Step at concurrency {level} produced {actual} outcomes.")]
    OutcomeCountMismatch { level: usize, actual: usize },
}
