//! Progress bar fed by kernel progress updates.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;

use pibench_core::progress::ProgressUpdate;
use pibench_orchestration::interfaces::ProgressReporter;

const TEMPLATE: &str = "{prefix:>12} [{bar:40.cyan/blue}] {pos}/{len} terms ({eta})";

/// Progress bar on stderr summing the terms folded by every worker.
pub struct CLIProgressReporter {
    bar: ProgressBar,
    steps: Mutex<HashMap<usize, u64>>,
}

impl CLIProgressReporter {
    /// Create a bar for a run of `total_terms` terms.
    #[must_use]
    pub fn new(strategy: &str, total_terms: u64) -> Self {
        Self::with_target(strategy, total_terms, ProgressDrawTarget::stderr())
    }

    /// Create a bar that never draws.
    #[must_use]
    pub fn hidden(strategy: &str, total_terms: u64) -> Self {
        Self::with_target(strategy, total_terms, ProgressDrawTarget::hidden())
    }

    fn with_target(strategy: &str, total_terms: u64, target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::with_draw_target(Some(total_terms), target).with_style(style);
        bar.set_prefix(strategy.to_string());
        Self {
            bar,
            steps: Mutex::new(HashMap::new()),
        }
    }

    /// Terms folded so far across all workers.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Drain `updates` on a background thread until every sender is gone.
    pub fn listen(self: Arc<Self>, updates: Receiver<ProgressUpdate>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            for update in updates {
                self.report(&update);
            }
            self.complete();
        })
    }
}

impl ProgressReporter for CLIProgressReporter {
    fn report(&self, update: &ProgressUpdate) {
        let mut steps = self.steps.lock();
        steps.insert(update.worker, update.current_step);
        self.bar.set_position(steps.values().sum());
    }

    fn complete(&self) {
        self.bar.finish_and_clear();
    }
}
