use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::info;

use crate::config::CampaignConfig;
use crate::error::{AppError, AppResult};
use crate::http::RequestInvoker;
use crate::metrics::StepSummary;

use super::progress::format_elapsed;
use super::step::run_step;
use super::summary::{print_summary, recap_lines};

const RULE_WIDTH: usize = 60;

/// What one step measured, kept after its console block is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub summary: StepSummary,
    /// Wall time from dispatch to the end of the step summary.
    pub duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignReport {
    pub steps: Vec<StepReport>,
}

/// Runs every configured level in order, with the cooldown between steps.
///
/// Failed invocations never stop the campaign.
///
/// # Errors
///
/// Returns an error only if a step yields a batch that cannot be summarized.
pub async fn run_campaign<I>(config: &CampaignConfig, invoker: Arc<I>) -> AppResult<CampaignReport>
where
    I: RequestInvoker + ?Sized + 'static,
{
    print_banner(config);

    let total_steps = config.concurrency_levels.len();
    let mut report = CampaignReport::default();

    for (idx, level) in config.concurrency_levels.iter().copied().enumerate() {
        let position = idx.saturating_add(1);
        println!();
        println!(
            "=== Step {}/{}: {} parallel requests ===",
            position, total_steps, level
        );

        let started = Instant::now();
        let outcomes = run_step(level, &invoker).await;
        let summary = StepSummary::from_outcomes(level, &outcomes).map_err(AppError::metrics)?;
        print_summary(&summary, &outcomes);
        let duration = started.elapsed();

        println!("  Step duration: {}", format_elapsed(Some(duration)));
        println!("{}", "=".repeat(RULE_WIDTH));
        info!(
            level = level.get(),
            errors = summary.error_count,
            "Step finished in {:?}",
            duration
        );
        report.steps.push(StepReport { summary, duration });

        if position < total_steps {
            info!("Cooling down for {:?}", config.cooldown);
            sleep(config.cooldown).await;
        }
    }

    println!();
    for line in recap_lines(&report.steps) {
        println!("{}", line);
    }

    Ok(report)
}

/// Where the campaign settings came from, shown so an override file in the
/// working directory never goes unnoticed.
#[must_use]
pub fn config_origin(config: &CampaignConfig) -> String {
    config.source.as_ref().map_or_else(
        || "built-in defaults".to_owned(),
        |path| path.display().to_string(),
    )
}

fn print_banner(config: &CampaignConfig) {
    let levels: Vec<String> = config
        .concurrency_levels
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Capture load campaign: POST {}", config.target_url);
    println!("  Config       : {}", config_origin(config));
    println!("  Payload      : {}", config.payload);
    println!("  Levels       : {}", levels.join(", "));
    println!(
        "  Timeout      : {} per request, cooldown {}",
        format_elapsed(Some(config.request_timeout)),
        format_elapsed(Some(config.cooldown))
    );
    println!("  Started      : {}", chrono::Local::now().to_rfc3339());
}
