use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to encode request payload: {source}")]
    EncodePayload {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
