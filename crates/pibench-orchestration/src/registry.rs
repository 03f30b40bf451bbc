//! Scheduler factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use pibench_core::kernel::PiError;

use crate::distributed::DistributedScheduler;
use crate::pool::SharedMemoryScheduler;
use crate::scheduler::{Scheduler, SequentialScheduler};

/// Factory trait for creating schedulers.
pub trait SchedulerFactory: Send + Sync {
    /// Get or create a scheduler by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Scheduler>, PiError>;

    /// List all available scheduler names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    workers: Option<usize>,
    cache: RwLock<HashMap<String, Arc<dyn Scheduler>>>,
}

impl DefaultFactory {
    /// Create a new default factory; parallel schedulers size themselves.
    #[must_use]
    pub fn new() -> Self {
        Self::with_workers(None)
    }

    /// Create a factory whose parallel schedulers use `workers` workers.
    #[must_use]
    pub fn with_workers(workers: Option<usize>) -> Self {
        Self {
            workers,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_scheduler(&self, name: &str) -> Result<Arc<dyn Scheduler>, PiError> {
        match name {
            "sequential" | "serial" => Ok(Arc::new(SequentialScheduler::new())),
            "pool" | "shared" => Ok(Arc::new(match self.workers {
                Some(w) => SharedMemoryScheduler::with_workers(w),
                None => SharedMemoryScheduler::new(),
            })),
            "distributed" | "ranks" => Ok(Arc::new(match self.workers {
                Some(w) => DistributedScheduler::with_ranks(w),
                None => DistributedScheduler::new(),
            })),
            _ => Err(PiError::Config(format!("unknown strategy: {name}"))),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn Scheduler>, PiError> {
        if let Some(scheduler) = self.cache.read().get(name) {
            return Ok(Arc::clone(scheduler));
        }

        let scheduler = self.create_scheduler(name)?;
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&scheduler));
        Ok(scheduler)
    }

    fn available(&self) -> Vec<&str> {
        vec!["sequential", "pool", "distributed"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_creates_each_strategy() {
        let factory = DefaultFactory::new();
        assert_eq!(factory.get("sequential").unwrap().name(), "Sequential");
        assert_eq!(factory.get("pool").unwrap().name(), "SharedMemory");
        assert_eq!(factory.get("distributed").unwrap().name(), "Distributed");
    }

    #[test]
    fn factory_aliases() {
        let factory = DefaultFactory::new();
        assert_eq!(factory.get("serial").unwrap().name(), "Sequential");
        assert_eq!(factory.get("shared").unwrap().name(), "SharedMemory");
        assert_eq!(factory.get("ranks").unwrap().name(), "Distributed");
    }

    #[test]
    fn factory_caches() {
        let factory = DefaultFactory::new();
        let a = factory.get("pool").unwrap();
        let b = factory.get("pool").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn factory_applies_worker_override() {
        let factory = DefaultFactory::with_workers(Some(3));
        assert_eq!(factory.get("pool").unwrap().workers(10_000), 3);
        assert_eq!(factory.get("distributed").unwrap().workers(10_000), 3);
        assert_eq!(factory.get("sequential").unwrap().workers(10_000), 1);
    }

    #[test]
    fn factory_unknown_name() {
        let factory = DefaultFactory::new();
        assert!(matches!(factory.get("gpu"), Err(PiError::Config(_))));
    }

    #[test]
    fn factory_available() {
        let factory = DefaultFactory::default();
        assert_eq!(factory.available(), vec!["sequential", "pool", "distributed"]);
    }
}
