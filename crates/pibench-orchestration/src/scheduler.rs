//! Scheduling models for a π run.
//!
//! Every scheduler partitions `[0, n)`, drives one kernel invocation per
//! range, and hands the partial sums to the reducer barrier. They differ
//! only in how the workers are executed.

use pibench_core::kernel::{PiError, SeriesKernel};
use pibench_core::observer::ProgressObserver;
use pibench_core::partition::partition;
use pibench_core::precision::ArithmeticContext;
use pibench_core::FixedPoint;

use crate::reducer::PartialSlots;

/// Public trait for scheduling strategies, consumed by orchestration.
pub trait Scheduler: Send + Sync {
    /// Compute the total of the series over `[0, n)`.
    fn execute(
        &self,
        kernel: &dyn SeriesKernel,
        ctx: &ArithmeticContext,
        n: u64,
        observer: &dyn ProgressObserver,
    ) -> Result<FixedPoint, PiError>;

    /// Number of workers this scheduler uses for `n` terms.
    fn workers(&self, n: u64) -> usize;

    /// Get the name of this scheduler.
    fn name(&self) -> &'static str;
}

/// Single thread of control owning the whole domain.
pub struct SequentialScheduler;

impl SequentialScheduler {
    /// Create a new sequential scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequentialScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SequentialScheduler {
    fn execute(
        &self,
        kernel: &dyn SeriesKernel,
        ctx: &ArithmeticContext,
        n: u64,
        observer: &dyn ProgressObserver,
    ) -> Result<FixedPoint, PiError> {
        let ranges = partition(n, 1)?;
        let mut slots = PartialSlots::new(ranges.len());
        for range in &ranges {
            slots.insert(kernel.partial_sum(ctx, range, observer)?)?;
        }
        slots.into_total(ctx, n)
    }

    fn workers(&self, _n: u64) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }
}
