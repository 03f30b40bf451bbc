//! Combine step: the barrier between workers and the coordinator.
//!
//! Partial sums are parked in one slot per worker as they arrive and are
//! only added once every slot is filled, in worker-index order.

use tracing::error;

use pibench_core::kernel::{PartialSum, PiError};
use pibench_core::partition::{verify_coverage, WorkRange};
use pibench_core::precision::ArithmeticContext;
use pibench_core::FixedPoint;

/// One slot per expected worker.
#[derive(Debug)]
pub struct PartialSlots {
    slots: Vec<Option<PartialSum>>,
}

impl PartialSlots {
    /// Create empty slots for `workers` workers.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            slots: vec![None; workers],
        }
    }

    /// Number of workers expected.
    #[must_use]
    pub fn expected(&self) -> usize {
        self.slots.len()
    }

    /// Number of partial sums received so far.
    #[must_use]
    pub fn received(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether every worker has reported.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Park a partial sum in the slot of the worker that produced it.
    pub fn insert(&mut self, partial: PartialSum) -> Result<(), PiError> {
        let worker = partial.range.index;
        let expected = self.slots.len();
        let slot = self.slots.get_mut(worker).ok_or_else(|| {
            PiError::Collective(format!(
                "partial sum from worker {worker} outside a group of {expected}"
            ))
        })?;
        if slot.is_some() {
            return Err(PiError::Collective(format!(
                "duplicate partial sum from worker {worker}"
            )));
        }
        *slot = Some(partial);
        Ok(())
    }

    /// Sum every partial once all workers have reported.
    ///
    /// Fails if a slot is empty, if a partial was computed at a different
    /// precision than `ctx`, or if the ranges do not cover `[0, n)`.
    pub fn into_total(self, ctx: &ArithmeticContext, n: u64) -> Result<FixedPoint, PiError> {
        let mut partials = Vec::with_capacity(self.slots.len());
        for (worker, slot) in self.slots.into_iter().enumerate() {
            let Some(partial) = slot else {
                error!(worker, "missing partial sum, aborting the run");
                return Err(PiError::WorkerLost { worker });
            };
            if partial.value.bits() != ctx.bits() {
                return Err(PiError::PrecisionMismatch {
                    expected: ctx.bits(),
                    found: partial.value.bits(),
                });
            }
            partials.push(partial);
        }

        let ranges: Vec<WorkRange> = partials.iter().map(|p| p.range).collect();
        verify_coverage(&ranges, n)?;

        let mut total = ctx.zero();
        for partial in &partials {
            total.checked_add_assign(&partial.value)?;
        }
        Ok(total)
    }
}

/// Combine a complete set of partial sums produced by `workers` workers.
pub fn combine(
    ctx: &ArithmeticContext,
    n: u64,
    workers: usize,
    partials: impl IntoIterator<Item = PartialSum>,
) -> Result<FixedPoint, PiError> {
    let mut slots = PartialSlots::new(workers);
    for partial in partials {
        slots.insert(partial)?;
    }
    slots.into_total(ctx, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pibench_core::kernel::{BbpKernel, SeriesKernel};
    use pibench_core::observers::NoOpObserver;
    use pibench_core::partition::partition;
    use pibench_core::precision::Precision;
    use pibench_core::term::sum_terms;

    fn partials(ctx: &ArithmeticContext, n: u64, workers: usize) -> Vec<PartialSum> {
        let kernel = BbpKernel::new();
        partition(n, workers)
            .unwrap()
            .iter()
            .map(|r| kernel.partial_sum(ctx, r, &NoOpObserver::new()).unwrap())
            .collect()
    }

    #[test]
    fn combine_in_any_arrival_order() {
        let ctx = ArithmeticContext::default();
        let mut parts = partials(&ctx, 200, 5);
        parts.reverse();
        let total = combine(&ctx, 200, 5, parts).unwrap();
        assert_eq!(total, sum_terms(&ctx, 200));
    }

    #[test]
    fn missing_partial_aborts() {
        let ctx = ArithmeticContext::default();
        let mut parts = partials(&ctx, 100, 4);
        parts.remove(2);
        assert!(matches!(
            combine(&ctx, 100, 4, parts),
            Err(PiError::WorkerLost { worker: 2 })
        ));
    }

    #[test]
    fn duplicate_partial_rejected() {
        let ctx = ArithmeticContext::default();
        let parts = partials(&ctx, 100, 2);
        let mut slots = PartialSlots::new(2);
        slots.insert(parts[0].clone()).unwrap();
        assert!(matches!(
            slots.insert(parts[0].clone()),
            Err(PiError::Collective(_))
        ));
    }

    #[test]
    fn unknown_worker_rejected() {
        let ctx = ArithmeticContext::default();
        let parts = partials(&ctx, 100, 4);
        let mut slots = PartialSlots::new(2);
        assert!(slots.insert(parts[3].clone()).is_err());
    }

    #[test]
    fn precision_mismatch_aborts() {
        let ctx = ArithmeticContext::default();
        let other = ArithmeticContext::new(Precision::new(20).unwrap());
        let mut parts = partials(&ctx, 100, 2);
        parts[1] = partials(&other, 100, 2).remove(1);
        assert!(matches!(
            combine(&ctx, 100, 2, parts),
            Err(PiError::PrecisionMismatch { .. })
        ));
    }

    #[test]
    fn coverage_checked_before_sum() {
        let ctx = ArithmeticContext::default();
        let parts = partials(&ctx, 100, 2);
        assert!(matches!(
            combine(&ctx, 120, 2, parts),
            Err(PiError::Coverage(_))
        ));
    }

    #[test]
    fn slot_accounting() {
        let ctx = ArithmeticContext::default();
        let parts = partials(&ctx, 30, 3);
        let mut slots = PartialSlots::new(3);
        assert_eq!(slots.expected(), 3);
        assert!(!slots.is_complete());
        for p in parts {
            slots.insert(p).unwrap();
        }
        assert_eq!(slots.received(), 3);
        assert!(slots.is_complete());
    }
}
