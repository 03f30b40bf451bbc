//! Orchestration interfaces.

use std::time::Duration;

use pibench_core::kernel::PiError;
use pibench_core::progress::ProgressUpdate;
use pibench_core::verify::VerificationReport;
use pibench_core::FixedPoint;

/// Trait for reporting progress to the user.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress update.
    fn report(&self, update: &ProgressUpdate);

    /// Report completion.
    fn complete(&self);
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present one verified run.
    fn present_result(&self, result: &RunResult, report: &VerificationReport);

    /// Present a comparison of several runs.
    fn present_comparison(&self, results: &[RunResult]);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single run.
#[derive(Debug)]
pub struct RunResult {
    /// Scheduler name.
    pub strategy: String,
    /// Number of workers or ranks used.
    pub workers: usize,
    /// The computed total or a structured error.
    pub outcome: Result<FixedPoint, PiError>,
    /// Wall-clock duration from dispatch through combine.
    pub duration: Duration,
}
