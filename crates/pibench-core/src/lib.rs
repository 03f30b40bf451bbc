//! # pibench-core
//!
//! Core library for PiBench: fixed-point evaluation of the base-16
//! Bailey–Borwein–Plouffe series, partitioning of the index domain,
//! per-range kernels, and digit-level verification against a reference.

pub mod constants;
pub mod fixed;
pub mod kernel;
pub mod observer;
pub mod observers;
pub mod partition;
pub mod precision;
pub mod progress;
pub mod term;
pub mod verify;

// Re-exports
pub use constants::{exit_codes, DECIMAL_DIGITS, REFERENCE_DIGITS, SERIES_TERMS};
pub use fixed::FixedPoint;
pub use kernel::{BbpKernel, PartialSum, PiError, SeriesKernel};
pub use observer::{ProgressObserver, ProgressSubject};
pub use partition::{partition, WorkRange};
pub use precision::{ArithmeticContext, Precision};
pub use progress::ProgressUpdate;
pub use verify::{verify, VerificationReport};

/// Compute π with the default precision and term count, sequentially.
///
/// This is a convenience function for simple use cases. Parallel and
/// distributed runs go through the schedulers of `pibench-orchestration`.
///
/// # Example
/// ```
/// let report = pibench_core::verify(&pibench_core::pi(), pibench_core::Precision::default());
/// assert!(report.is_exact());
/// ```
#[must_use]
pub fn pi() -> FixedPoint {
    let ctx = ArithmeticContext::default();
    term::sum_terms(&ctx, SERIES_TERMS)
}
