//! Distributed scheduler: a group of cooperating ranks.
//!
//! Each rank runs the same program: derive the owned range from its rank id
//! and the group size, fold it, and join the sum reduction onto rank 0.
//! Ranks run as scoped OS threads connected by a [`ChannelCommunicator`].

use tracing::{debug, error, info};

use pibench_core::kernel::{PiError, SeriesKernel};
use pibench_core::observer::ProgressObserver;
use pibench_core::partition::{default_worker_count, owned_range, validate_workers};
use pibench_core::precision::ArithmeticContext;
use pibench_core::FixedPoint;

use crate::communicator::{ChannelCommunicator, Communicator, ROOT_RANK};
use crate::scheduler::Scheduler;

/// Program executed by every rank of the group.
///
/// Returns the total on the root and `None` on every other rank; a
/// non-root rank discards its partial sum once it has been contributed.
pub fn run_rank<C: Communicator + ?Sized>(
    comm: &C,
    kernel: &dyn SeriesKernel,
    ctx: &ArithmeticContext,
    n: u64,
    observer: &dyn ProgressObserver,
) -> Result<Option<FixedPoint>, PiError> {
    let range = owned_range(n, comm.size(), comm.rank())?;
    debug!(
        rank = comm.rank(),
        start = range.start,
        end = range.end,
        "rank computing owned range"
    );
    let partial = kernel
        .partial_sum(ctx, &range, observer)
        .map_err(|e| PiError::WorkerFailed {
            worker: comm.rank(),
            reason: e.to_string(),
        })?;
    comm.reduce_sum(ctx, n, partial)
}

/// Message-passing rank group.
pub struct DistributedScheduler {
    ranks: Option<usize>,
}

impl DistributedScheduler {
    /// Create a rank group sized to the available hardware parallelism.
    #[must_use]
    pub fn new() -> Self {
        Self { ranks: None }
    }

    /// Create a rank group of `ranks` members.
    #[must_use]
    pub fn with_ranks(ranks: usize) -> Self {
        Self { ranks: Some(ranks) }
    }
}

impl Default for DistributedScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for DistributedScheduler {
    fn execute(
        &self,
        kernel: &dyn SeriesKernel,
        ctx: &ArithmeticContext,
        n: u64,
        observer: &dyn ProgressObserver,
    ) -> Result<FixedPoint, PiError> {
        let size = self.workers(n);
        validate_workers(n, size)?;

        let group = ChannelCommunicator::group(size);
        let outcomes: Vec<Result<Option<FixedPoint>, PiError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = group
                .into_iter()
                .map(|comm| {
                    std::thread::Builder::new()
                        .name(format!("pibench-rank-{}", comm.rank()))
                        .spawn_scoped(scope, move || run_rank(&comm, kernel, ctx, n, observer))
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(rank, handle)| match handle {
                    Ok(handle) => handle.join().unwrap_or_else(|_| {
                        Err(PiError::WorkerFailed {
                            worker: rank,
                            reason: "rank panicked".into(),
                        })
                    }),
                    Err(e) => Err(PiError::Collective(format!(
                        "failed to spawn rank {rank}: {e}"
                    ))),
                })
                .collect()
        });

        let mut total = None;
        let mut failures = Vec::new();
        for (rank, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(Some(value)) => total = Some(value),
                Ok(None) => {}
                Err(e) => {
                    error!(rank, error = %e, "rank failed");
                    failures.push((rank, e));
                }
            }
        }

        if !failures.is_empty() {
            // A rank's own failure is the cause; lost contributions and
            // broken links on other ranks are its consequences.
            let cause = failures
                .iter()
                .position(|(_, e)| matches!(e, PiError::WorkerFailed { .. }))
                .or_else(|| failures.iter().position(|(rank, _)| *rank != ROOT_RANK))
                .unwrap_or(0);
            return Err(failures.swap_remove(cause).1);
        }
        let total =
            total.ok_or_else(|| PiError::Collective("root rank produced no total".into()))?;
        info!(ranks = size, "reduction complete");
        Ok(total)
    }

    fn workers(&self, n: u64) -> usize {
        self.ranks.unwrap_or_else(|| default_worker_count(n))
    }

    fn name(&self) -> &'static str {
        "Distributed"
    }
}
