//! Progress updates emitted by kernels.

/// Progress update sent from a worker to observers.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Worker (or rank) index.
    pub worker: usize,
    /// Name of the kernel producing this update.
    pub source: &'static str,
    /// Progress through the worker's range as a fraction in [0.0, 1.0].
    pub progress: f64,
    /// Terms folded so far.
    pub current_step: u64,
    /// Terms in the worker's range.
    pub total_steps: u64,
    /// Whether this is the final update.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create a new progress update.
    #[must_use]
    pub fn new(
        worker: usize,
        source: &'static str,
        progress: f64,
        current: u64,
        total: u64,
    ) -> Self {
        Self {
            worker,
            source,
            progress,
            current_step: current,
            total_steps: total,
            done: false,
        }
    }

    /// Create a completion update for a range of `total` terms.
    #[must_use]
    pub fn done(worker: usize, source: &'static str, total: u64) -> Self {
        Self {
            worker,
            source,
            progress: 1.0,
            current_step: total,
            total_steps: total,
            done: true,
        }
    }
}
