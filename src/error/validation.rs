use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("At least one concurrency level is required.")]
    NoConcurrencyLevels,
    #[error("Concurrency level #{position} must be >= 1.")]
    ZeroConcurrencyLevel { position: usize },
    #[error("Concurrency level #{position} is {level}; at most {max} is supported.")]
    ConcurrencyLevelTooHigh {
        position: usize,
        level: usize,
        max: usize,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[error("URL must include a host.")]
    UrlMissingHost,
    #[error("At least one required response key is needed.")]
    NoRequiredKeys,
    #[error("Required response key must not be empty.")]
    EmptyRequiredKey,
    #[error("Invalid HTTP status code {code}. Expected 100-599.")]
    InvalidStatusCode { code: u16 },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Duration must be > 0.")]
    DurationZero,
}
