use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::{
    config_origin, progress_line, recap_lines, run_campaign, run_step, summary_lines,
};
use crate::config::CampaignConfig;
use crate::domain::{HttpStatus, OutcomeError, RequestOutcome, ResponseContract};
use crate::http::RequestInvoker;
use crate::metrics::StepSummary;

const FULL_BODY: &str = r#"{"request_id":"r1","screenshot":"b64data","session_id":"s1"}"#;

/// Hands out scripted outcomes in call order, each after its own delay.
struct ScriptedInvoker {
    script: Vec<(Duration, RequestOutcome)>,
    calls: AtomicUsize,
}

impl ScriptedInvoker {
    fn new(script: Vec<(Duration, RequestOutcome)>) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestInvoker for ScriptedInvoker {
    async fn invoke(&self) -> RequestOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let slot = call.checked_rem(self.script.len()).unwrap_or(0);
        match self.script.get(slot) {
            Some((delay, outcome)) => {
                sleep(*delay).await;
                outcome.clone()
            }
            None => RequestOutcome::transport_failure(OutcomeError::Transport {
                detail: "empty script".to_owned(),
            }),
        }
    }
}

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn level(value: usize) -> Result<NonZeroUsize, String> {
    NonZeroUsize::new(value).ok_or_else(|| "level must be non-zero".to_owned())
}

fn contract() -> ResponseContract {
    ResponseContract::new(["request_id", "screenshot", "session_id"], 200, 100)
}

fn captured(millis: u64) -> RequestOutcome {
    contract().evaluate(FULL_BODY, HttpStatus::Code(200), Duration::from_millis(millis))
}

fn timed_out() -> RequestOutcome {
    RequestOutcome::transport_failure(OutcomeError::Timeout {
        timeout: Duration::from_secs(90),
        detail: "operation timed out".to_owned(),
    })
}

fn timeout_script() -> Vec<(Duration, RequestOutcome)> {
    vec![
        (Duration::from_millis(40), captured(1000)),
        (Duration::from_millis(5), captured(1200)),
        (Duration::from_millis(20), captured(1500)),
        (Duration::from_millis(60), timed_out()),
    ]
}

#[test]
fn step_with_one_timeout_reports_quarter_error_rate() -> Result<(), String> {
    run_async_test(async {
        let invoker = Arc::new(ScriptedInvoker::new(timeout_script()));
        let outcomes = run_step(level(4)?, &invoker).await;

        if outcomes.len() != 4 || invoker.calls() != 4 {
            return Err(format!("Expected 4 outcomes, got {}", outcomes.len()));
        }
        let first = outcomes
            .first()
            .ok_or_else(|| "Missing first outcome".to_owned())?;
        if first.elapsed() != Some(Duration::from_millis(1200)) {
            return Err("Outcomes must arrive in completion order".to_owned());
        }
        let last = outcomes
            .last()
            .ok_or_else(|| "Missing last outcome".to_owned())?;
        if last.is_success() || last.elapsed().is_some() {
            return Err("Slowest invocation should be the untimed timeout".to_owned());
        }

        let summary =
            StepSummary::from_outcomes(level(4)?, &outcomes).map_err(|err| err.to_string())?;
        if summary.success_count() != 3 || summary.error_count != 1 {
            return Err(format!("Unexpected counts: {:?}", summary));
        }
        if summary.error_rate.to_string() != "25.0" {
            return Err(format!("Unexpected rate: {}", summary.error_rate));
        }
        Ok(())
    })
}

#[test]
fn step_runs_all_invocations_concurrently() -> Result<(), String> {
    run_async_test(async {
        let script = vec![(Duration::from_millis(200), captured(200))];
        let invoker = Arc::new(ScriptedInvoker::new(script));
        let started = tokio::time::Instant::now();
        let outcomes = run_step(level(8)?, &invoker).await;
        let elapsed = started.elapsed();

        if outcomes.len() != 8 {
            return Err(format!("Expected 8 outcomes, got {}", outcomes.len()));
        }
        if elapsed >= Duration::from_millis(800) {
            return Err(format!("Invocations were serialized: {:?}", elapsed));
        }
        Ok(())
    })
}

#[test]
fn progress_line_tags_failures_with_error() -> Result<(), String> {
    let ok_line = progress_line(3, &captured(1234));
    if ok_line != "03: [OK] code=200 t=1.23s" {
        return Err(format!("Unexpected line: {}", ok_line));
    }
    let fail_line = progress_line(12, &timed_out());
    if !fail_line.starts_with("12: [FAIL] code=unknown t=n/a | err=Request timed out") {
        return Err(format!("Unexpected line: {}", fail_line));
    }
    Ok(())
}

#[test]
fn summary_lists_every_failure() -> Result<(), String> {
    let outcomes = vec![
        contract().evaluate("not-json", HttpStatus::Code(502), Duration::from_millis(10)),
        captured(20),
        contract().evaluate(r#"{"request_id":""}"#, HttpStatus::Code(200), Duration::from_millis(30)),
    ];
    let summary =
        StepSummary::from_outcomes(level(3)?, &outcomes).map_err(|err| err.to_string())?;
    let lines = summary_lines(&summary, &outcomes);

    let failures: Vec<&String> = lines.iter().filter(|line| line.starts_with("    - ")).collect();
    if failures.len() != 2 {
        return Err(format!("Expected 2 failure lines, got {:?}", lines));
    }
    if !lines.iter().any(|line| line == "  Errors       : 2/3") {
        return Err(format!("Missing error count: {:?}", lines));
    }
    if !lines.iter().any(|line| line == "  Error rate   : 66.7%") {
        return Err(format!("Missing error rate: {:?}", lines));
    }
    if !lines.iter().any(|line| line.contains("| raw: not-json")) {
        return Err(format!("Missing raw excerpt: {:?}", lines));
    }
    Ok(())
}

#[test]
fn clean_summary_has_no_failure_block() -> Result<(), String> {
    let outcomes = vec![captured(100), captured(300)];
    let summary =
        StepSummary::from_outcomes(level(2)?, &outcomes).map_err(|err| err.to_string())?;
    let lines = summary_lines(&summary, &outcomes);
    if lines.iter().any(|line| line.contains("Failure details")) {
        return Err(format!("Unexpected failure block: {:?}", lines));
    }
    if !lines.iter().any(|line| line == "  Mean time    : 0.20s") {
        return Err(format!("Unexpected mean: {:?}", lines));
    }
    Ok(())
}

#[test]
fn campaign_runs_every_level_in_order() -> Result<(), String> {
    run_async_test(async {
        let config = CampaignConfig {
            concurrency_levels: vec![level(1)?, level(3)?, level(2)?],
            cooldown: Duration::from_millis(1),
            ..CampaignConfig::default()
        };
        let script = vec![
            (Duration::from_millis(1), captured(5)),
            (Duration::from_millis(1), timed_out()),
        ];
        let invoker = Arc::new(ScriptedInvoker::new(script));
        let report = run_campaign(&config, Arc::clone(&invoker))
            .await
            .map_err(|err| err.to_string())?;

        let seen: Vec<usize> = report
            .steps
            .iter()
            .map(|step| step.summary.concurrency_level.get())
            .collect();
        if seen != vec![1, 3, 2] {
            return Err(format!("Unexpected step order: {:?}", seen));
        }
        if invoker.calls() != 6 {
            return Err(format!("Expected 6 invocations, got {}", invoker.calls()));
        }
        let total_errors: usize = report.steps.iter().map(|step| step.summary.error_count).sum();
        if total_errors != 3 {
            return Err(format!("Expected 3 failures across the campaign, got {}", total_errors));
        }
        if recap_lines(&report.steps).len() != 4 {
            return Err("Recap must have a header and one line per step".to_owned());
        }
        Ok(())
    })
}

#[test]
fn campaign_does_not_stop_on_total_failure() -> Result<(), String> {
    run_async_test(async {
        let config = CampaignConfig {
            concurrency_levels: vec![level(2)?, level(2)?],
            cooldown: Duration::from_millis(1),
            ..CampaignConfig::default()
        };
        let invoker = Arc::new(ScriptedInvoker::new(vec![(Duration::ZERO, timed_out())]));
        let report = run_campaign(&config, invoker)
            .await
            .map_err(|err| err.to_string())?;
        if report.steps.len() != 2 {
            return Err(format!("Expected 2 steps, got {}", report.steps.len()));
        }
        if report.steps.iter().any(|step| step.summary.latency.is_some()) {
            return Err("All-timeout steps must not report latency".to_owned());
        }
        Ok(())
    })
}

#[test]
fn config_origin_names_the_override_file() -> Result<(), String> {
    let built_in = CampaignConfig::default();
    if config_origin(&built_in) != "built-in defaults" {
        return Err(format!("Unexpected origin: {}", config_origin(&built_in)));
    }
    let overridden = CampaignConfig {
        source: Some(std::path::PathBuf::from("capture-load.toml")),
        ..CampaignConfig::default()
    };
    if config_origin(&overridden) != "capture-load.toml" {
        return Err(format!("Unexpected origin: {}", config_origin(&overridden)));
    }
    Ok(())
}
