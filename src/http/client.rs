use reqwest::Client;
use tracing::{error, warn};

use crate::config::CampaignConfig;
use crate::error::{AppError, AppResult, HttpError};

const USER_AGENT: &str = concat!("capture-load/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every invocation of a campaign.
///
/// Idle connections are not kept, so each invocation opens its own
/// connection and its timing includes the handshake.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(config: &CampaignConfig) -> AppResult<Client> {
    let mut builder = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(0);

    if config.insecure {
        warn!("TLS certificate verification is disabled.");
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    builder.build().map_err(|err| {
        error!("Failed to build HTTP client: {}", err);
        AppError::http(HttpError::BuildClientFailed { source: err })
    })
}
