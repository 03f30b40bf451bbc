//! Concrete observer implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::observer::ProgressObserver;
use crate::progress::ProgressUpdate;

/// Per-worker progress throttle.
#[derive(Default)]
struct WorkerThrottle {
    last_reported: Mutex<HashMap<usize, f64>>,
}

impl WorkerThrottle {
    /// Record `update` if it moved its worker forward by the report threshold.
    fn admit(&self, update: &ProgressUpdate) -> bool {
        let mut last = self.last_reported.lock();
        let previous = last.get(&update.worker).copied().unwrap_or(0.0);
        if update.done || (update.progress - previous) >= PROGRESS_REPORT_THRESHOLD {
            last.insert(update.worker, update.progress);
            true
        } else {
            false
        }
    }
}

/// Observer that forwards updates through a channel.
///
/// Intermediate updates are dropped when the channel is full; completion
/// updates wait for room so that every finished range is accounted for.
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
    throttle: WorkerThrottle,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self {
            sender,
            throttle: WorkerThrottle::default(),
        }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if !self.throttle.admit(update) {
            return;
        }
        // A closed channel drops the update either way.
        if update.done {
            let _ = self.sender.send(update.clone());
        } else {
            let _ = self.sender.try_send(update.clone());
        }
    }
}

/// Observer that logs progress with temporal throttling.
pub struct LoggingObserver {
    throttle: WorkerThrottle,
    min_interval_ms: u64,
    last_time: AtomicU64,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            throttle: WorkerThrottle::default(),
            min_interval_ms,
            last_time: AtomicU64::new(0),
        }
    }
}

impl ProgressObserver for LoggingObserver {
    #[allow(clippy::cast_possible_truncation)]
    fn on_progress(&self, update: &ProgressUpdate) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last_time = self.last_time.load(Ordering::Relaxed);
        if now.saturating_sub(last_time) < self.min_interval_ms && !update.done {
            return;
        }
        if !self.throttle.admit(update) {
            return;
        }

        if update.done {
            info!(
                worker = update.worker,
                kernel = update.source,
                terms = update.total_steps,
                "Range complete"
            );
        } else {
            debug!(
                worker = update.worker,
                kernel = update.source,
                progress = format!("{:.1}%", update.progress * 100.0),
                step = update.current_step,
                total = update.total_steps,
                "Progress update"
            );
        }
        self.last_time.store(now, Ordering::Relaxed);
    }
}

/// Null object pattern: discards every update.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}
