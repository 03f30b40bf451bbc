//! Strategy selection logic.

use std::sync::Arc;

use pibench_core::kernel::PiError;

use crate::registry::SchedulerFactory;
use crate::scheduler::Scheduler;

/// Get the schedulers to run for a strategy name (`all` selects every one).
pub fn get_schedulers_to_run(
    strategy: &str,
    factory: &dyn SchedulerFactory,
) -> Result<Vec<Arc<dyn Scheduler>>, PiError> {
    match strategy {
        "all" => factory
            .available()
            .into_iter()
            .map(|name| factory.get(name))
            .collect(),
        name => Ok(vec![factory.get(name)?]),
    }
}
