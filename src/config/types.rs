use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ValidationError;

use super::defaults::{
    DEFAULT_CAPTURE_DELAY_SECS, DEFAULT_CAPTURE_URL, DEFAULT_CONCURRENCY_LEVELS, DEFAULT_COOLDOWN,
    DEFAULT_EXCERPT_CHARS, DEFAULT_EXPECTED_STATUS, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_REQUIRED_KEYS, DEFAULT_TARGET_URL,
};

/// Immutable campaign settings, built once at startup and shared by every
/// component.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignConfig {
    pub target_url: String,
    pub payload: Value,
    pub concurrency_levels: Vec<NonZeroUsize>,
    pub cooldown: Duration,
    pub request_timeout: Duration,
    pub expected_status: u16,
    pub required_keys: Vec<String>,
    /// Skip TLS certificate and hostname verification.
    pub insecure: bool,
    pub excerpt_chars: usize,
    pub verbose: bool,
    /// Override file the values were read from; `None` for the built-in campaign.
    pub source: Option<PathBuf>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_owned(),
            payload: json!({
                "url": DEFAULT_CAPTURE_URL,
                "delay": DEFAULT_CAPTURE_DELAY_SECS,
            }),
            concurrency_levels: DEFAULT_CONCURRENCY_LEVELS
                .iter()
                .copied()
                .filter_map(NonZeroUsize::new)
                .collect(),
            cooldown: DEFAULT_COOLDOWN,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            expected_status: DEFAULT_EXPECTED_STATUS,
            required_keys: DEFAULT_REQUIRED_KEYS
                .iter()
                .map(|key| (*key).to_owned())
                .collect(),
            insecure: true,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            verbose: false,
            source: None,
        }
    }
}

/// Override file contents. Every field is optional and falls back to the
/// built-in campaign.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "target_url")]
    pub url: Option<String>,
    pub payload: Option<Value>,
    #[serde(alias = "steps", alias = "levels")]
    pub concurrency_levels: Option<Vec<usize>>,
    pub cooldown: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub status: Option<u16>,
    pub required_keys: Option<Vec<String>>,
    pub insecure: Option<bool>,
    pub excerpt_chars: Option<usize>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}
