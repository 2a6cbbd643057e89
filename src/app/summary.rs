use crate::domain::RequestOutcome;
use crate::metrics::StepSummary;

use super::campaign::StepReport;
use super::progress::format_elapsed;

/// Summary block for one step, failures listed in full.
#[must_use]
pub fn summary_lines(summary: &StepSummary, outcomes: &[RequestOutcome]) -> Vec<String> {
    let level = summary.concurrency_level.get();
    let mut lines = vec![format!("Summary for {} requests:", level)];

    match summary.latency {
        Some(latency) => {
            lines.push(format!("  Min time     : {}", format_elapsed(Some(latency.min))));
            lines.push(format!("  Max time     : {}", format_elapsed(Some(latency.max))));
            lines.push(format!("  Mean time    : {}", format_elapsed(Some(latency.mean))));
        }
        None => lines.push("  Timing       : no timed responses".to_owned()),
    }
    lines.push(format!("  Errors       : {}/{}", summary.error_count, level));
    lines.push(format!("  Error rate   : {}%", summary.error_rate));

    if summary.error_count > 0 {
        lines.push("  -> Failure details:".to_owned());
        lines.extend(outcomes.iter().filter_map(|outcome| {
            outcome.error().map(|error| {
                format!(
                    "    - {} | raw: {}",
                    error,
                    outcome.raw_excerpt().unwrap_or_default()
                )
            })
        }));
    }

    lines
}

pub fn print_summary(summary: &StepSummary, outcomes: &[RequestOutcome]) {
    println!();
    for line in summary_lines(summary, outcomes) {
        println!("{}", line);
    }
}

/// One line per step for the end-of-campaign recap.
#[must_use]
pub fn recap_lines(steps: &[StepReport]) -> Vec<String> {
    let mut lines = vec!["Campaign recap:".to_owned()];
    lines.extend(steps.iter().map(|step| {
        let summary = &step.summary;
        let mean = summary.latency.map(|latency| latency.mean);
        format!(
            "  {:>3} parallel: errors {}/{} ({}%), mean {}, step {}",
            summary.concurrency_level,
            summary.error_count,
            summary.concurrency_level,
            summary.error_rate,
            format_elapsed(mean),
            format_elapsed(Some(step.duration))
        )
    }));
    lines
}
