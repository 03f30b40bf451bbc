//! Shared-memory parallel scheduler.
//!
//! Each range is dispatched as one task onto a fixed-size rayon pool.
//! Tasks report `(worker, result)` over a channel; the coordinator drains
//! the channel only after the pool scope has joined every task.

use std::panic::{self, AssertUnwindSafe};

use rayon::ThreadPoolBuilder;
use tracing::{debug, error};

use pibench_core::kernel::{PartialSum, PiError, SeriesKernel};
use pibench_core::observer::ProgressObserver;
use pibench_core::partition::{available_threads, default_worker_count, partition};
use pibench_core::precision::ArithmeticContext;
use pibench_core::FixedPoint;

use crate::reducer::PartialSlots;
use crate::scheduler::Scheduler;

/// Worker pool over OS threads.
pub struct SharedMemoryScheduler {
    workers: Option<usize>,
}

impl SharedMemoryScheduler {
    /// Create a pool scheduler sized to the available hardware parallelism.
    #[must_use]
    pub fn new() -> Self {
        Self { workers: None }
    }

    /// Create a pool scheduler with an explicit worker count.
    ///
    /// The count is validated against `n` when the run starts.
    #[must_use]
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: Some(workers),
        }
    }
}

impl Default for SharedMemoryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SharedMemoryScheduler {
    fn execute(
        &self,
        kernel: &dyn SeriesKernel,
        ctx: &ArithmeticContext,
        n: u64,
        observer: &dyn ProgressObserver,
    ) -> Result<FixedPoint, PiError> {
        let workers = self.workers(n);
        let ranges = partition(n, workers)?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.min(available_threads()))
            .thread_name(|i| format!("pibench-worker-{i}"))
            .build()
            .map_err(|e| PiError::Calculation(format!("failed to create thread pool: {e}")))?;

        let (tx, rx) = crossbeam_channel::unbounded::<(usize, Result<PartialSum, PiError>)>();

        pool.scope(|scope| {
            for range in &ranges {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    debug!(
                        worker = range.index,
                        start = range.start,
                        end = range.end,
                        "dispatching range"
                    );
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        kernel.partial_sum(ctx, range, observer)
                    }));
                    match outcome {
                        Ok(result) => {
                            let _ = tx.send((range.index, result));
                        }
                        Err(_) => {
                            error!(worker = range.index, "worker panicked before reporting");
                        }
                    }
                });
            }
        });
        drop(tx);

        let mut slots = PartialSlots::new(workers);
        for (worker, result) in rx.iter() {
            let partial = result.map_err(|e| PiError::WorkerFailed {
                worker,
                reason: e.to_string(),
            })?;
            slots.insert(partial)?;
        }
        slots.into_total(ctx, n)
    }

    fn workers(&self, n: u64) -> usize {
        self.workers.unwrap_or_else(|| default_worker_count(n))
    }

    fn name(&self) -> &'static str {
        "SharedMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pibench_core::kernel::BbpKernel;
    use pibench_core::observers::NoOpObserver;
    use pibench_core::partition::WorkRange;
    use pibench_core::term::sum_terms;

    /// Kernel whose worker `failing` either panics or errors.
    struct FaultyKernel {
        failing: usize,
        panic: bool,
    }

    impl SeriesKernel for FaultyKernel {
        fn partial_sum(
            &self,
            ctx: &ArithmeticContext,
            range: &WorkRange,
            observer: &dyn ProgressObserver,
        ) -> Result<PartialSum, PiError> {
            if range.index == self.failing {
                if self.panic {
                    panic!("simulated worker crash");
                }
                return Err(PiError::Calculation("simulated failure".into()));
            }
            BbpKernel::new().partial_sum(ctx, range, observer)
        }

        fn name(&self) -> &'static str {
            "Faulty"
        }
    }

    #[test]
    fn pool_matches_direct_sum() {
        let ctx = ArithmeticContext::default();
        let total = SharedMemoryScheduler::with_workers(4)
            .execute(&BbpKernel::new(), &ctx, 500, &NoOpObserver::new())
            .unwrap();
        assert_eq!(total, sum_terms(&ctx, 500));
    }

    #[test]
    fn pool_with_more_ranges_than_threads() {
        let ctx = ArithmeticContext::default();
        let total = SharedMemoryScheduler::with_workers(64)
            .execute(&BbpKernel::new(), &ctx, 64, &NoOpObserver::new())
            .unwrap();
        assert_eq!(total, sum_terms(&ctx, 64));
    }

    #[test]
    fn pool_default_workers() {
        let scheduler = SharedMemoryScheduler::new();
        let workers = scheduler.workers(10_000);
        assert!((1..=10_000).contains(&workers));
        assert_eq!(scheduler.workers(1), 1);
    }

    #[test]
    fn crashed_worker_aborts_run() {
        let ctx = ArithmeticContext::default();
        let kernel = FaultyKernel {
            failing: 2,
            panic: true,
        };
        let result =
            SharedMemoryScheduler::with_workers(4).execute(&kernel, &ctx, 100, &NoOpObserver::new());
        assert!(matches!(result, Err(PiError::WorkerLost { worker: 2 })));
    }

    #[test]
    fn failed_worker_aborts_run() {
        let ctx = ArithmeticContext::default();
        let kernel = FaultyKernel {
            failing: 1,
            panic: false,
        };
        let result =
            SharedMemoryScheduler::with_workers(3).execute(&kernel, &ctx, 90, &NoOpObserver::new());
        assert!(matches!(result, Err(PiError::WorkerFailed { worker: 1, .. })));
    }

    #[test]
    fn zero_workers_rejected() {
        let ctx = ArithmeticContext::default();
        let result = SharedMemoryScheduler::with_workers(0).execute(
            &BbpKernel::new(),
            &ctx,
            100,
            &NoOpObserver::new(),
        );
        assert!(matches!(result, Err(PiError::Config(_))));
    }

    #[test]
    fn too_many_workers_rejected() {
        let ctx = ArithmeticContext::default();
        let result = SharedMemoryScheduler::with_workers(11).execute(
            &BbpKernel::new(),
            &ctx,
            10,
            &NoOpObserver::new(),
        );
        assert!(matches!(result, Err(PiError::Config(_))));
    }
}
