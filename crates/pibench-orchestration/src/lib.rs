//! # pibench-orchestration
//!
//! Scheduling models for the BBP series (sequential, shared-memory pool,
//! message-passing ranks), the reducer barrier they share, scheduler
//! selection, and timed runs with cross-strategy analysis.

pub mod communicator;
pub mod distributed;
pub mod interfaces;
pub mod orchestrator;
pub mod pool;
pub mod reducer;
pub mod registry;
pub mod scheduler;
pub mod strategy_selection;

pub use communicator::{ChannelCommunicator, Communicator, ROOT_RANK};
pub use distributed::DistributedScheduler;
pub use interfaces::{ProgressReporter, ResultPresenter, RunResult};
pub use orchestrator::{analyze_comparison_results, execute_runs, execute_runs_with_observer};
pub use pool::SharedMemoryScheduler;
pub use registry::{DefaultFactory, SchedulerFactory};
pub use scheduler::{Scheduler, SequentialScheduler};
pub use strategy_selection::get_schedulers_to_run;
