//! Series kernel trait, partial sums, and the error taxonomy.
//!
//! `SeriesKernel` is the task contract consumed by every scheduler: a
//! function from `(range, context)` to one `PartialSum`.
//! `BbpKernel` folds the Term Evaluator over the range.

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::trace;

use crate::constants::PROGRESS_STEPS;
use crate::fixed::FixedPoint;
use crate::observer::ProgressObserver;
use crate::partition::WorkRange;
use crate::precision::ArithmeticContext;
use crate::progress::ProgressUpdate;
use crate::term::term;

/// Error type for π runs. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PiError {
    /// Invalid configuration, rejected before dispatch.
    #[error("configuration error: {0}")]
    Config(String),

    /// A worker terminated without producing its partial sum.
    #[error("worker {worker} terminated without producing a partial sum")]
    WorkerLost {
        /// Index of the missing worker.
        worker: usize,
    },

    /// A worker reported a failure instead of a partial sum.
    #[error("worker {worker} failed: {reason}")]
    WorkerFailed {
        /// Index of the failing worker.
        worker: usize,
        /// Failure description.
        reason: String,
    },

    /// Two values were produced at different working precisions.
    #[error("precision mismatch: expected {expected} bits, found {found}")]
    PrecisionMismatch {
        /// Bits of the arithmetic context.
        expected: u64,
        /// Bits of the offending value.
        found: u64,
    },

    /// Assigned ranges do not partition the index domain.
    #[error("coverage error: {0}")]
    Coverage(String),

    /// The collective reduction could not complete.
    #[error("collective operation failed: {0}")]
    Collective(String),

    /// Scheduling strategies disagree on the total.
    #[error("result mismatch between scheduling strategies")]
    Mismatch,

    /// Generic calculation error.
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl PiError {
    /// Whether the error stems from a lost or failed worker.
    #[must_use]
    pub fn is_worker_failure(&self) -> bool {
        matches!(
            self,
            Self::WorkerLost { .. } | Self::WorkerFailed { .. } | Self::Collective(_)
        )
    }
}

/// Accumulated terms of one worker's range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSum {
    /// The range that was folded.
    pub range: WorkRange,
    /// Sum of the terms in `range`.
    pub value: FixedPoint,
}

/// Computes the partial sum of one range.
pub trait SeriesKernel: Send + Sync {
    /// Fold the terms of `range` at the precision of `ctx`.
    fn partial_sum(
        &self,
        ctx: &ArithmeticContext,
        range: &WorkRange,
        observer: &dyn ProgressObserver,
    ) -> Result<PartialSum, PiError>;

    /// Name used in progress updates and logs.
    fn name(&self) -> &'static str;
}

/// Bailey–Borwein–Plouffe kernel.
///
/// # Example
/// ```
/// use pibench_core::kernel::{BbpKernel, SeriesKernel};
/// use pibench_core::observers::NoOpObserver;
/// use pibench_core::partition::partition;
/// use pibench_core::precision::ArithmeticContext;
///
/// let ctx = ArithmeticContext::default();
/// let range = partition(20, 1).unwrap()[0];
/// let partial = BbpKernel::new().partial_sum(&ctx, &range, &NoOpObserver::new()).unwrap();
/// assert!(partial.value.to_decimal_string(20).starts_with("3.14159265358979"));
/// ```
pub struct BbpKernel;

impl BbpKernel {
    /// Create a new BBP kernel.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for BbpKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesKernel for BbpKernel {
    #[allow(clippy::cast_precision_loss)]
    fn partial_sum(
        &self,
        ctx: &ArithmeticContext,
        range: &WorkRange,
        observer: &dyn ProgressObserver,
    ) -> Result<PartialSum, PiError> {
        let total = range.len();
        let stride = (total / PROGRESS_STEPS).max(1);
        trace!(worker = range.index, start = range.start, end = range.end, "folding range");

        let mut acc = BigInt::zero();
        for index in range.iter() {
            acc += term(ctx, index).into_mantissa();

            let done = index - range.start + 1;
            if done % stride == 0 && done < total {
                observer.on_progress(&ProgressUpdate::new(
                    range.index,
                    self.name(),
                    done as f64 / total as f64,
                    done,
                    total,
                ));
            }
        }

        observer.on_progress(&ProgressUpdate::done(range.index, self.name(), total));
        Ok(PartialSum {
            range: *range,
            value: FixedPoint::from_raw(acc, ctx.bits()),
        })
    }

    fn name(&self) -> &'static str {
        "BBP"
    }
}
