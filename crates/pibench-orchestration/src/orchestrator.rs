//! Core orchestration: timed runs and cross-strategy analysis.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use pibench_core::kernel::{PiError, SeriesKernel};
use pibench_core::observer::ProgressObserver;
use pibench_core::observers::NoOpObserver;
use pibench_core::precision::ArithmeticContext;

use crate::interfaces::RunResult;
use crate::scheduler::Scheduler;

/// Execute a run with each of the given schedulers.
pub fn execute_runs(
    schedulers: &[Arc<dyn Scheduler>],
    kernel: &dyn SeriesKernel,
    ctx: &ArithmeticContext,
    n: u64,
) -> Vec<RunResult> {
    execute_runs_with_observer(schedulers, kernel, ctx, n, &NoOpObserver::new())
}

/// Execute a run with each of the given schedulers and a progress observer.
///
/// Runs are executed one after another so that each timing covers a
/// scheduler that has the machine to itself.
pub fn execute_runs_with_observer(
    schedulers: &[Arc<dyn Scheduler>],
    kernel: &dyn SeriesKernel,
    ctx: &ArithmeticContext,
    n: u64,
    observer: &dyn ProgressObserver,
) -> Vec<RunResult> {
    schedulers
        .iter()
        .map(|scheduler| {
            let workers = scheduler.workers(n);
            let start = Instant::now();
            let outcome = scheduler.execute(kernel, ctx, n, observer);
            let duration = start.elapsed();

            match &outcome {
                Ok(_) => info!(
                    strategy = scheduler.name(),
                    workers,
                    elapsed_ms = duration.as_millis(),
                    "run finished"
                ),
                Err(e) => error!(strategy = scheduler.name(), workers, error = %e, "run failed"),
            }

            RunResult {
                strategy: scheduler.name().to_string(),
                workers,
                outcome,
                duration,
            }
        })
        .collect()
}

/// Analyze comparison results for mismatches.
///
/// Totals are exact sums of identical terms, so every successful
/// strategy must agree bit for bit.
pub fn analyze_comparison_results(results: &[RunResult]) -> Result<(), PiError> {
    let mut totals = results.iter().filter_map(|r| r.outcome.as_ref().ok());

    let Some(first) = totals.next() else {
        return Err(PiError::Calculation("no valid results".into()));
    };

    if totals.any(|total| total != first) {
        return Err(PiError::Mismatch);
    }

    Ok(())
}
