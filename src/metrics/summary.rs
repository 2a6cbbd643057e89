use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::domain::RequestOutcome;
use crate::error::MetricsError;

/// Tenths of a percent per whole ratio.
const RATE_SCALE: u64 = 1_000;
/// Tenths per percent.
const RATE_DIVISOR: u64 = 10;

/// Min, max and mean over the outcomes that carried a timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
    pub samples: usize,
}

impl LatencyStats {
    /// Returns `None` for an empty sample set; aggregates are never invented.
    #[must_use]
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let min = samples.iter().min().copied()?;
        let max = samples.iter().max().copied()?;
        let total = samples
            .iter()
            .fold(Duration::ZERO, |acc, sample| acc.saturating_add(*sample));
        let count = u32::try_from(samples.len()).unwrap_or(u32::MAX);
        let mean = total.checked_div(count)?;
        Some(Self {
            min,
            max,
            mean,
            samples: samples.len(),
        })
    }
}

/// Error rate in tenths of a percent. Exact ties round to the even tenth,
/// so 1 of 16 prints as `6.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ErrorRate {
    tenths: u64,
}

impl ErrorRate {
    #[must_use]
    pub fn new(errors: usize, level: NonZeroUsize) -> Self {
        let errors = u64::try_from(errors).unwrap_or(u64::MAX);
        let level = u64::try_from(level.get()).unwrap_or(u64::MAX);
        let scaled = errors.saturating_mul(RATE_SCALE);
        let quotient = scaled.checked_div(level).unwrap_or(0);
        let twice_remainder = scaled.checked_rem(level).unwrap_or(0).saturating_mul(2);
        let round_up = twice_remainder > level || (twice_remainder == level && quotient % 2 == 1);
        let tenths = if round_up {
            quotient.saturating_add(1)
        } else {
            quotient
        };
        Self { tenths }
    }

    #[must_use]
    pub const fn tenths_of_percent(self) -> u64 {
        self.tenths
    }
}

impl fmt::Display for ErrorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}",
            self.tenths / RATE_DIVISOR,
            self.tenths % RATE_DIVISOR
        )
    }
}

/// Aggregate over one concurrency level's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    pub concurrency_level: NonZeroUsize,
    /// `None` when no outcome in the batch was timed.
    pub latency: Option<LatencyStats>,
    pub error_count: usize,
    pub error_rate: ErrorRate,
}

impl StepSummary {
    /// Summarizes a completed step.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::OutcomeCountMismatch` when the batch does not
    /// hold exactly one outcome per dispatched invocation.
    pub fn from_outcomes(
        level: NonZeroUsize,
        outcomes: &[RequestOutcome],
    ) -> Result<Self, MetricsError> {
        if outcomes.len() != level.get() {
            return Err(MetricsError::OutcomeCountMismatch {
                level: level.get(),
                actual: outcomes.len(),
            });
        }

        let timings: Vec<Duration> = outcomes
            .iter()
            .filter_map(RequestOutcome::elapsed)
            .collect();
        let error_count = outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .count();

        Ok(Self {
            concurrency_level: level,
            latency: LatencyStats::from_samples(&timings),
            error_count,
            error_rate: ErrorRate::new(error_count, level),
        })
    }

    #[must_use]
    pub const fn success_count(&self) -> usize {
        self.concurrency_level.get().saturating_sub(self.error_count)
    }
}
