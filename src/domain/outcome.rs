use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Status observed for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Code(u16),
    /// The exchange failed before a status line was read.
    Unknown,
}

impl HttpStatus {
    #[must_use]
    pub const fn code(self) -> Option<u16> {
        match self {
            HttpStatus::Code(code) => Some(code),
            HttpStatus::Unknown => None,
        }
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpStatus::Code(code) => write!(f, "{}", code),
            HttpStatus::Unknown => f.write_str("unknown"),
        }
    }
}

/// Why a single invocation did not count as a success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    #[error("Request timed out after {}ms: {detail}", .timeout.as_millis())]
    Timeout { timeout: Duration, detail: String },
    #[error("Request failed: {detail}")]
    Transport { detail: String },
    #[error("JSON error: {detail}")]
    Json { detail: String },
    #[error("{0}")]
    Contract(ContractViolation),
    #[error("Worker task failed: {detail}")]
    Worker { detail: String },
}

impl OutcomeError {
    /// Transport-level failures never produced a status or timing.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            OutcomeError::Timeout { .. } | OutcomeError::Transport { .. } | OutcomeError::Worker { .. }
        )
    }
}

/// Required keys that were absent or falsy, plus the status that came with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    pub missing: BTreeSet<String>,
    pub empty: BTreeSet<String>,
    pub status: HttpStatus,
    pub expected_status: u16,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing: {} empty: {}",
            KeySet(&self.missing),
            KeySet(&self.empty)
        )?;
        if self.status.code() != Some(self.expected_status) {
            write!(
                f,
                " status: {} (expected {})",
                self.status, self.expected_status
            )?;
        }
        Ok(())
    }
}

/// Renders `{'a', 'b'}`, or `{}` when nothing is listed.
struct KeySet<'set>(&'set BTreeSet<String>);

impl fmt::Display for KeySet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, key) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", key)?;
        }
        f.write_str("}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Failure {
    error: OutcomeError,
    raw_excerpt: String,
}

/// Result of one invocation. Immutable once built; a failure always carries
/// its error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    status: HttpStatus,
    elapsed: Option<Duration>,
    failure: Option<Failure>,
}

impl RequestOutcome {
    pub(crate) const fn succeeded(status: HttpStatus, elapsed: Duration) -> Self {
        Self {
            status,
            elapsed: Some(elapsed),
            failure: None,
        }
    }

    pub(crate) const fn failed(
        status: HttpStatus,
        elapsed: Option<Duration>,
        error: OutcomeError,
        raw_excerpt: String,
    ) -> Self {
        Self {
            status,
            elapsed,
            failure: Some(Failure { error, raw_excerpt }),
        }
    }

    /// An exchange that never completed: no status, no timing, no body.
    pub(crate) const fn transport_failure(error: OutcomeError) -> Self {
        Self::failed(HttpStatus::Unknown, None, error, String::new())
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    #[must_use]
    pub const fn status(&self) -> HttpStatus {
        self.status
    }

    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    #[must_use]
    pub const fn error(&self) -> Option<&OutcomeError> {
        match &self.failure {
            Some(failure) => Some(&failure.error),
            None => None,
        }
    }

    #[must_use]
    pub fn raw_excerpt(&self) -> Option<&str> {
        self.failure
            .as_ref()
            .map(|failure| failure.raw_excerpt.as_str())
    }
}
