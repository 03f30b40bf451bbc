//! Partitioning of the series index domain `[0, n)` across workers.
//!
//! The partition is a pure function of `(n, workers)`, so every rank of a
//! group derives its own range without receiving an assignment message.

use std::ops::Range;

use crate::kernel::PiError;

/// A contiguous, half-open slice `[start, end)` of the index domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkRange {
    /// Position of this range in the partition (worker or rank id).
    pub index: usize,
    /// First index owned.
    pub start: u64,
    /// One past the last index owned.
    pub end: u64,
}

impl WorkRange {
    /// Number of indices in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the range owns no index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Iterate the owned indices in increasing order.
    #[must_use]
    pub fn iter(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Validate a worker count against the domain size.
pub fn validate_workers(n: u64, workers: usize) -> Result<(), PiError> {
    if n == 0 {
        return Err(PiError::Config("series must have at least one term".into()));
    }
    if workers == 0 {
        return Err(PiError::Config("worker count must be at least 1".into()));
    }
    if workers as u64 > n {
        return Err(PiError::Config(format!(
            "worker count {workers} exceeds the number of terms {n}"
        )));
    }
    Ok(())
}

/// Range owned by `rank` in a group of `size` workers over `[0, n)`.
///
/// Every range holds `n / size` indices; the last one also takes the
/// remainder.
pub fn owned_range(n: u64, size: usize, rank: usize) -> Result<WorkRange, PiError> {
    validate_workers(n, size)?;
    if rank >= size {
        return Err(PiError::Config(format!(
            "rank {rank} is outside a group of {size}"
        )));
    }
    let chunk = n / size as u64;
    let start = chunk * rank as u64;
    let end = if rank == size - 1 { n } else { start + chunk };
    Ok(WorkRange {
        index: rank,
        start,
        end,
    })
}

/// Split `[0, n)` into `workers` contiguous ranges.
///
/// # Example
/// ```
/// use pibench_core::partition::partition;
///
/// let ranges = partition(10, 3).unwrap();
/// let bounds: Vec<(u64, u64)> = ranges.iter().map(|r| (r.start, r.end)).collect();
/// assert_eq!(bounds, vec![(0, 3), (3, 6), (6, 10)]);
/// ```
pub fn partition(n: u64, workers: usize) -> Result<Vec<WorkRange>, PiError> {
    validate_workers(n, workers)?;
    (0..workers).map(|rank| owned_range(n, workers, rank)).collect()
}

/// Check that `ranges`, in order, are contiguous and cover exactly `[0, n)`.
pub fn verify_coverage(ranges: &[WorkRange], n: u64) -> Result<(), PiError> {
    let mut expected_start = 0u64;
    for (position, range) in ranges.iter().enumerate() {
        if range.index != position {
            return Err(PiError::Coverage(format!(
                "range at position {position} reports index {}",
                range.index
            )));
        }
        if range.is_empty() {
            return Err(PiError::Coverage(format!("range {position} is empty")));
        }
        if range.start != expected_start {
            return Err(PiError::Coverage(format!(
                "range {position} starts at {} but {expected_start} was expected",
                range.start
            )));
        }
        expected_start = range.end;
    }
    if expected_start != n {
        return Err(PiError::Coverage(format!(
            "ranges end at {expected_start} but the domain ends at {n}"
        )));
    }
    Ok(())
}

/// Hardware threads available to this process (at least 1).
#[must_use]
pub fn available_threads() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Default worker count: available hardware parallelism, at most `n`.
#[must_use]
pub fn default_worker_count(n: u64) -> usize {
    let cap = usize::try_from(n).unwrap_or(usize::MAX);
    available_threads().min(cap).max(1)
}
