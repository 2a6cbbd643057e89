use std::time::Duration;

use crate::domain::RequestOutcome;

/// Seconds with two decimals, or `n/a` when the outcome was never timed.
#[must_use]
pub fn format_elapsed(elapsed: Option<Duration>) -> String {
    elapsed.map_or_else(
        || "n/a".to_owned(),
        |value| format!("{:.2}s", value.as_secs_f64()),
    )
}

/// One line per completed invocation, numbered in completion order.
#[must_use]
pub fn progress_line(index: usize, outcome: &RequestOutcome) -> String {
    let tag = if outcome.is_success() { "OK" } else { "FAIL" };
    let line = format!(
        "{:02}: [{}] code={} t={}",
        index,
        tag,
        outcome.status(),
        format_elapsed(outcome.elapsed())
    );
    match outcome.error() {
        Some(error) => format!("{} | err={}", line, error),
        None => line,
    }
}
