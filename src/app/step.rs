use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

use crate::domain::{OutcomeError, RequestOutcome};
use crate::http::RequestInvoker;

use super::progress::progress_line;

/// Dispatches `level` invocations at once and collects them as they finish.
///
/// The worker pool is sized to the level, so no invocation waits for a slot.
/// Outcomes come back in completion order and a progress line is printed for
/// each one as it arrives. There is no step-wide deadline; each invocation is
/// bounded by its own request timeout.
pub async fn run_step<I>(level: NonZeroUsize, invoker: &Arc<I>) -> Vec<RequestOutcome>
where
    I: RequestInvoker + ?Sized + 'static,
{
    let pool = Arc::new(Semaphore::new(level.get()));
    let mut workers = JoinSet::new();

    for _ in 0..level.get() {
        let pool = Arc::clone(&pool);
        let invoker = Arc::clone(invoker);
        workers.spawn(async move {
            let _slot = pool.acquire_owned().await.ok();
            invoker.invoke().await
        });
    }

    let mut outcomes = Vec::with_capacity(level.get());
    while let Some(joined) = workers.join_next().await {
        let outcome = joined.unwrap_or_else(|err| {
            error!("Invocation task failed: {}", err);
            RequestOutcome::transport_failure(OutcomeError::Worker {
                detail: err.to_string(),
            })
        });
        let index = outcomes.len().saturating_add(1);
        println!("{}", progress_line(index, &outcome));
        outcomes.push(outcome);
    }

    outcomes
}
