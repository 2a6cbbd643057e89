use std::collections::BTreeSet;
use std::num::FpCategory;
use std::time::Duration;

use serde_json::Value;

use crate::config::CampaignConfig;

use super::outcome::{ContractViolation, HttpStatus, OutcomeError, RequestOutcome};

/// Structural contract a capture response must satisfy.
///
/// Checking is pure: the same body and status always produce the same verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContract {
    required_keys: BTreeSet<String>,
    expected_status: u16,
    excerpt_chars: usize,
}

impl ResponseContract {
    #[must_use]
    pub fn new<I, K>(required_keys: I, expected_status: u16, excerpt_chars: usize) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            required_keys: required_keys.into_iter().map(Into::into).collect(),
            expected_status,
            excerpt_chars,
        }
    }

    #[must_use]
    pub fn from_config(config: &CampaignConfig) -> Self {
        Self::new(
            config.required_keys.iter().cloned(),
            config.expected_status,
            config.excerpt_chars,
        )
    }

    #[must_use]
    pub const fn expected_status(&self) -> u16 {
        self.expected_status
    }

    /// Judge a response body and status.
    ///
    /// # Errors
    ///
    /// Returns `OutcomeError::Json` when the body is not JSON, and
    /// `OutcomeError::Contract` when a required key is missing or falsy or the
    /// status differs from the expected one.
    pub fn check(&self, body: &str, status: HttpStatus) -> Result<(), OutcomeError> {
        let parsed: Value = serde_json::from_str(body).map_err(|err| OutcomeError::Json {
            detail: err.to_string(),
        })?;

        let mut missing = BTreeSet::new();
        let mut empty = BTreeSet::new();
        for key in &self.required_keys {
            match parsed.get(key) {
                None => {
                    missing.insert(key.clone());
                }
                Some(value) if !is_truthy(value) => {
                    empty.insert(key.clone());
                }
                Some(_) => {}
            }
        }

        let status_ok = status.code() == Some(self.expected_status);
        if missing.is_empty() && empty.is_empty() && status_ok {
            return Ok(());
        }

        Err(OutcomeError::Contract(ContractViolation {
            missing,
            empty,
            status,
            expected_status: self.expected_status,
        }))
    }

    /// Build the outcome for a completed exchange.
    #[must_use]
    pub fn evaluate(&self, body: &str, status: HttpStatus, elapsed: Duration) -> RequestOutcome {
        match self.check(body, status) {
            Ok(()) => RequestOutcome::succeeded(status, elapsed),
            Err(error) => RequestOutcome::failed(
                status,
                Some(elapsed),
                error,
                excerpt(body, self.excerpt_chars),
            ),
        }
    }
}

pub(crate) fn excerpt(body: &str, max_chars: usize) -> String {
    body.trim().chars().take(max_chars).collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|float| float.classify() != FpCategory::Zero),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
