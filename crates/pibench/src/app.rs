//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use pibench_cli::presenter::CLIResultPresenter;
use pibench_cli::progress::CLIProgressReporter;
use pibench_core::constants::{DECIMAL_DIGITS, SERIES_TERMS};
use pibench_core::kernel::{BbpKernel, SeriesKernel};
use pibench_core::observer::ProgressSubject;
use pibench_core::observers::{ChannelObserver, LoggingObserver};
use pibench_core::precision::{ArithmeticContext, Precision};
use pibench_core::verify::verify;
use pibench_orchestration::interfaces::{ResultPresenter, RunResult};
use pibench_orchestration::orchestrator::{analyze_comparison_results, execute_runs_with_observer};
use pibench_orchestration::registry::DefaultFactory;
use pibench_orchestration::scheduler::Scheduler;
use pibench_orchestration::strategy_selection::get_schedulers_to_run;

use crate::config::AppConfig;
use crate::version::full_version;

/// Capacity of the progress channel; a full channel drops intermediate updates.
const PROGRESS_CHANNEL_CAPACITY: usize = 1024;

/// Minimum interval between logged progress lines under `--verbose`.
const LOG_INTERVAL_MS: u64 = 250;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        pibench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    config.validate()?;
    debug!(version = %full_version(), strategy = %config.strategy, "starting");

    let ctx = ArithmeticContext::new(Precision::new(DECIMAL_DIGITS)?);
    let factory = DefaultFactory::with_workers(config.workers);
    let schedulers = get_schedulers_to_run(&config.strategy, &factory)?;
    let kernel = BbpKernel::new();

    let results = schedulers
        .iter()
        .flat_map(|scheduler| run_observed(config, scheduler, &kernel, &ctx))
        .collect();

    present(config, &ctx, results)
}

/// Run one scheduler with the observers the flags ask for.
fn run_observed(
    config: &AppConfig,
    scheduler: &Arc<dyn Scheduler>,
    kernel: &dyn SeriesKernel,
    ctx: &ArithmeticContext,
) -> Vec<RunResult> {
    let subject = ProgressSubject::new();
    if config.verbose {
        subject.register(Arc::new(LoggingObserver::new(LOG_INTERVAL_MS)));
    }
    let listener = config.progress.then(|| {
        let reporter = Arc::new(CLIProgressReporter::new(scheduler.name(), SERIES_TERMS));
        let (tx, rx) = crossbeam_channel::bounded(PROGRESS_CHANNEL_CAPACITY);
        subject.register(Arc::new(ChannelObserver::new(tx)));
        reporter.listen(rx)
    });

    let results = execute_runs_with_observer(
        std::slice::from_ref(scheduler),
        kernel,
        ctx,
        SERIES_TERMS,
        &subject,
    );

    // Dropping the channel observer ends the listener.
    subject.clear();
    if let Some(listener) = listener {
        if listener.join().is_err() {
            warn!(strategy = scheduler.name(), "progress listener panicked");
        }
    }
    results
}

fn present(config: &AppConfig, ctx: &ArithmeticContext, results: Vec<RunResult>) -> Result<()> {
    let presenter = CLIResultPresenter::new(config.json, results.len() > 1);
    for result in &results {
        if let Ok(total) = &result.outcome {
            presenter.present_result(result, &verify(total, ctx.precision()));
        }
    }

    let comparison = if results.len() > 1 {
        presenter.present_comparison(&results);
        analyze_comparison_results(&results)
    } else {
        Ok(())
    };

    // A failed run takes precedence over a disagreement between the rest.
    if let Some((strategy, err)) = results
        .into_iter()
        .find_map(|r| r.outcome.err().map(|e| (r.strategy, e)))
    {
        return Err(err).with_context(|| format!("{strategy} run failed"));
    }

    comparison.context("strategies produced different totals")
}
