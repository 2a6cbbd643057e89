use std::num::NonZeroUsize;
use std::path::Path;

use url::Url;

use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::defaults::{DEFAULT_CONFIG_FILES, MAX_CONCURRENCY_LEVEL};
use super::loader::load_config;
use super::types::{CampaignConfig, ConfigFile};

/// Builds the campaign configuration: defaults, then the override file when
/// one is found, then validation.
///
/// # Errors
///
/// Returns an error when the override file cannot be loaded or the resulting
/// configuration is invalid.
pub fn resolve_config(path: Option<&Path>) -> AppResult<CampaignConfig> {
    let mut config = CampaignConfig::default();
    if let Some(loaded) = load_config(path, &DEFAULT_CONFIG_FILES)? {
        apply_config(&mut config, loaded.file)?;
        config.source = Some(loaded.path);
    }
    validate_config(&config)?;
    Ok(config)
}

/// Applies every field set in `file` on top of `config`.
///
/// # Errors
///
/// Returns an error when a duration or concurrency level cannot be converted.
pub fn apply_config(config: &mut CampaignConfig, file: ConfigFile) -> AppResult<()> {
    if let Some(url) = file.url {
        config.target_url = url;
    }
    if let Some(payload) = file.payload {
        config.payload = payload;
    }
    if let Some(levels) = file.concurrency_levels {
        config.concurrency_levels =
            to_levels(&levels).map_err(|err| invalid("concurrency_levels", err))?;
    }
    if let Some(cooldown) = file.cooldown {
        config.cooldown = cooldown
            .to_duration()
            .map_err(|err| invalid("cooldown", err))?;
    }
    if let Some(timeout) = file.timeout {
        config.request_timeout = timeout
            .to_duration()
            .map_err(|err| invalid("timeout", err))?;
    }
    if let Some(status) = file.status {
        config.expected_status = status;
    }
    if let Some(keys) = file.required_keys {
        config.required_keys = keys;
    }
    if let Some(insecure) = file.insecure {
        config.insecure = insecure;
    }
    if let Some(excerpt_chars) = file.excerpt_chars {
        config.excerpt_chars = excerpt_chars;
    }
    if let Some(verbose) = file.verbose {
        config.verbose = verbose;
    }
    Ok(())
}

/// Checks the invariants the campaign relies on.
///
/// # Errors
///
/// Returns a validation error for an empty level list, a level above
/// `MAX_CONCURRENCY_LEVEL`, a bad target URL, an empty required-key list, or
/// an out-of-range status code.
pub fn validate_config(config: &CampaignConfig) -> AppResult<()> {
    if config.concurrency_levels.is_empty() {
        return Err(AppError::validation(ValidationError::NoConcurrencyLevels));
    }
    if let Some((idx, level)) = config
        .concurrency_levels
        .iter()
        .enumerate()
        .find(|(_, level)| level.get() > MAX_CONCURRENCY_LEVEL)
    {
        return Err(AppError::validation(
            ValidationError::ConcurrencyLevelTooHigh {
                position: idx.saturating_add(1),
                level: level.get(),
                max: MAX_CONCURRENCY_LEVEL,
            },
        ));
    }
    validate_target_url(&config.target_url).map_err(AppError::validation)?;
    if config.required_keys.is_empty() {
        return Err(AppError::validation(ValidationError::NoRequiredKeys));
    }
    if config.required_keys.iter().any(|key| key.trim().is_empty()) {
        return Err(AppError::validation(ValidationError::EmptyRequiredKey));
    }
    if !(100..=599).contains(&config.expected_status) {
        return Err(AppError::validation(ValidationError::InvalidStatusCode {
            code: config.expected_status,
        }));
    }
    Ok(())
}

fn validate_target_url(value: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(value).map_err(|err| ValidationError::InvalidUrl {
        url: value.to_owned(),
        source: err,
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            });
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(())
}

fn to_levels(values: &[usize]) -> Result<Vec<NonZeroUsize>, ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::NoConcurrencyLevels);
    }
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            NonZeroUsize::new(*value).ok_or(ValidationError::ZeroConcurrencyLevel {
                position: idx.saturating_add(1),
            })
        })
        .collect()
}

fn invalid(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
