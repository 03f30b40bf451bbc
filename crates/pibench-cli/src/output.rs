//! Report formatting.

use std::time::Duration;

use serde::Serialize;

use pibench_core::verify::VerificationReport;

/// Format the four-line run report.
///
/// The first two headings are followed by a newline so that both digit
/// strings start in the same column.
#[must_use]
pub fn format_report(report: &VerificationReport, elapsed: Duration) -> String {
    format!(
        "Computed pi value is: \n{}\nKnown pi value is: \n{}\nThe number of different digits is: {}\nTotal time taken: {} seconds",
        report.computed,
        report.known,
        report.differing_digits,
        format_seconds(elapsed),
    )
}

/// Seconds with four decimal places.
#[must_use]
pub fn format_seconds(d: Duration) -> String {
    format!("{:.4}", d.as_secs_f64())
}

/// Format a duration for the comparison table.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Machine-readable record of one run.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub strategy: &'a str,
    pub workers: usize,
    pub computed: &'a str,
    pub known: &'a str,
    pub differing_digits: usize,
    pub seconds: f64,
}

impl<'a> JsonReport<'a> {
    #[must_use]
    pub fn new(
        strategy: &'a str,
        workers: usize,
        report: &'a VerificationReport,
        elapsed: Duration,
    ) -> Self {
        Self {
            strategy,
            workers,
            computed: &report.computed,
            known: &report.known,
            differing_digits: report.differing_digits,
            seconds: elapsed.as_secs_f64(),
        }
    }

    /// Render as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the record cannot be encoded.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(computed: &str, differing_digits: usize) -> VerificationReport {
        VerificationReport {
            computed: computed.into(),
            known: "3.14159".into(),
            differing_digits,
        }
    }

    #[test]
    fn report_has_four_headed_lines() {
        let text = format_report(&report("3.14159", 0), Duration::from_millis(1500));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Computed pi value is: ",
                "3.14159",
                "Known pi value is: ",
                "3.14159",
                "The number of different digits is: 0",
                "Total time taken: 1.5000 seconds",
            ]
        );
    }

    #[test]
    fn report_shows_difference_count() {
        let text = format_report(&report("3.14169", 1), Duration::ZERO);
        assert!(text.contains("The number of different digits is: 1"));
        assert!(text.ends_with("Total time taken: 0.0000 seconds"));
    }

    #[test]
    fn seconds_have_four_decimals() {
        assert_eq!(format_seconds(Duration::from_micros(123_456)), "0.1235");
        assert_eq!(format_seconds(Duration::from_secs(2)), "2.0000");
    }

    #[test]
    fn format_duration_units() {
        assert!(format_duration(Duration::from_nanos(500)).contains("µs"));
        assert!(format_duration(Duration::from_millis(42)).contains("ms"));
        assert_eq!(format_duration(Duration::from_secs(3)), "3.000s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30.0s");
    }

    #[test]
    fn json_report_fields() {
        let r = report("3.14159", 0);
        let json = JsonReport::new("Sequential", 1, &r, Duration::from_millis(250))
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["strategy"], "Sequential");
        assert_eq!(value["workers"], 1);
        assert_eq!(value["computed"], "3.14159");
        assert_eq!(value["known"], "3.14159");
        assert_eq!(value["differing_digits"], 0);
        assert!((value["seconds"].as_f64().unwrap() - 0.25).abs() < 1e-9);
    }
}
