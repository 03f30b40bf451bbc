//! Compiled-in constants for the π computation.

/// Number of series terms summed per run (the index domain is `[0, N)`).
pub const SERIES_TERMS: u64 = 10_000;

/// Decimal digits of working precision.
pub const DECIMAL_DIGITS: u32 = 102;

/// Extra binary digits carried beyond the decimal precision.
///
/// Each term truncates four divisions and one scaling; over every non-zero
/// term the accumulated error stays far below 2^-GUARD_BITS of the last
/// reported digit.
pub const GUARD_BITS: u64 = 32;

/// Known expansion of π, 102 characters including the leading `3.`.
pub const REFERENCE_DIGITS: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

/// Minimum progress change (1%) before an observer forwards an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// Number of intermediate progress updates a kernel emits per range.
pub const PROGRESS_STEPS: u64 = 100;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution (digit mismatches included).
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Scheduling strategies produced different totals.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// A worker, rank, or collective operation failed.
    pub const ERROR_WORKER: i32 = 5;
}
