use std::sync::Arc;

use crate::app::run_campaign;
use crate::config::{CampaignConfig, resolve_config};
use crate::error::AppResult;
use crate::http::HttpInvoker;

/// Process entry: resolve configuration, start logging and the runtime, run
/// the campaign.
///
/// # Errors
///
/// Returns an error when configuration, the runtime, or the HTTP client
/// cannot be set up.
pub fn run() -> AppResult<()> {
    let config = resolve_config(None)?;

    crate::logger::init_logging(config.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config))
}

async fn run_async(config: CampaignConfig) -> AppResult<()> {
    let invoker = Arc::new(HttpInvoker::from_config(&config)?);
    tracing::debug!("Target resolved to {}", invoker.url());
    let report = run_campaign(&config, invoker).await?;
    tracing::info!("Campaign finished after {} steps", report.steps.len());
    Ok(())
}
