//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version string with the compiled-in workload.
#[must_use]
pub fn full_version() -> String {
    format!(
        "pibench {} (N = {}, {} digits)",
        version(),
        pibench_core::SERIES_TERMS,
        pibench_core::DECIMAL_DIGITS
    )
}
