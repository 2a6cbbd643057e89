//! Campaign configuration: built-in defaults plus an optional override file.
mod apply;
mod defaults;
mod loader;
mod parse;
pub mod types;


pub use apply::{apply_config, resolve_config, validate_config};
pub use defaults::{
    DEFAULT_CAPTURE_DELAY_SECS, DEFAULT_CAPTURE_URL, DEFAULT_CONCURRENCY_LEVELS,
    DEFAULT_CONFIG_FILES, DEFAULT_COOLDOWN, DEFAULT_EXCERPT_CHARS, DEFAULT_EXPECTED_STATUS,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_REQUIRED_KEYS, DEFAULT_TARGET_URL, MAX_CONCURRENCY_LEVEL,
};
pub use loader::{LoadedConfig, load_config, load_config_file};
pub use types::{CampaignConfig, ConfigFile, DurationValue};

pub(crate) use parse::parse_duration_value;
