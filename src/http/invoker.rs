use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request, Url};
use tracing::debug;

use crate::config::CampaignConfig;
use crate::domain::{HttpStatus, OutcomeError, RequestOutcome, ResponseContract};
use crate::error::{AppError, AppResult, HttpError};

use super::client::build_client;
use super::execution::{describe_error, execute_exchange};

/// One unit of work dispatched by the stepper.
#[async_trait]
pub trait RequestInvoker: Send + Sync {
    /// Runs a single invocation. Every failure is folded into the outcome.
    async fn invoke(&self) -> RequestOutcome;
}

/// Posts the campaign payload to the target and judges the response.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: Client,
    url: Url,
    body: String,
    timeout: Duration,
    contract: ResponseContract,
}

impl HttpInvoker {
    /// Builds the client, target URL, and encoded payload once for the whole
    /// campaign.
    ///
    /// # Errors
    ///
    /// Returns an error when the target URL is invalid, the payload cannot be
    /// encoded, or the HTTP client cannot be built.
    pub fn from_config(config: &CampaignConfig) -> AppResult<Self> {
        let url = Url::parse(&config.target_url).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: config.target_url.clone(),
                source: err,
            })
        })?;
        let body = serde_json::to_string(&config.payload)
            .map_err(|err| AppError::http(HttpError::EncodePayload { source: err }))?;
        let client = build_client(config)?;

        Ok(Self {
            client,
            url,
            body,
            timeout: config.request_timeout,
            contract: ResponseContract::from_config(config),
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    fn build_request(&self) -> Result<Request, reqwest::Error> {
        self.client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(self.body.clone())
            .build()
    }

    fn transport_error(&self, err: &reqwest::Error) -> OutcomeError {
        let detail = describe_error(err);
        if err.is_timeout() {
            OutcomeError::Timeout {
                timeout: self.timeout,
                detail,
            }
        } else {
            OutcomeError::Transport { detail }
        }
    }
}

#[async_trait]
impl RequestInvoker for HttpInvoker {
    async fn invoke(&self) -> RequestOutcome {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                return RequestOutcome::transport_failure(self.transport_error(&err));
            }
        };

        match execute_exchange(&self.client, request).await {
            Ok(exchange) => self.contract.evaluate(
                &exchange.body,
                HttpStatus::Code(exchange.status),
                exchange.elapsed,
            ),
            Err(err) => {
                debug!("Capture request failed: {}", err);
                RequestOutcome::transport_failure(self.transport_error(&err))
            }
        }
    }
}
