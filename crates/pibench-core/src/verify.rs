//! Result Verifier: positional comparison against the reference digits.

use serde::Serialize;

use crate::constants::REFERENCE_DIGITS;
use crate::fixed::FixedPoint;
use crate::precision::Precision;

/// Outcome of comparing a computed total with the reference digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Rendered total, truncated to the reference length.
    pub computed: String,
    /// Reference digits.
    pub known: String,
    /// Number of positions where `computed` and `known` differ.
    pub differing_digits: usize,
}

impl VerificationReport {
    /// Whether every compared position matched.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.differing_digits == 0
    }
}

/// Render `total` at `precision` significant digits, then truncate to
/// `len` characters.
#[must_use]
pub fn render_total(total: &FixedPoint, precision: Precision, len: usize) -> String {
    let mut rendered = total.to_decimal_string(precision.decimal_digits());
    rendered.truncate(len);
    rendered
}

/// Count the positions at which `computed` and `known` differ.
///
/// Only the common prefix is compared; position 0 of one string is matched
/// with position 0 of the other, without any decimal-point alignment.
///
/// # Example
/// ```
/// use pibench_core::verify::count_digit_differences;
///
/// assert_eq!(count_digit_differences("3.1416", "3.1415"), 1);
/// assert_eq!(count_digit_differences("3.1", "3.1415"), 0);
/// ```
#[must_use]
pub fn count_digit_differences(computed: &str, known: &str) -> usize {
    computed
        .chars()
        .zip(known.chars())
        .filter(|(c, k)| c != k)
        .count()
}

/// Compare `total` with [`REFERENCE_DIGITS`].
#[must_use]
pub fn verify(total: &FixedPoint, precision: Precision) -> VerificationReport {
    verify_against(total, precision, REFERENCE_DIGITS)
}

/// Compare `total` with an arbitrary reference string.
#[must_use]
pub fn verify_against(total: &FixedPoint, precision: Precision, known: &str) -> VerificationReport {
    let computed = render_total(total, precision, known.len());
    let differing_digits = count_digit_differences(&computed, known);
    VerificationReport {
        computed,
        known: known.to_string(),
        differing_digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::ArithmeticContext;

    #[test]
    fn identical_strings_have_no_differences() {
        assert_eq!(count_digit_differences(REFERENCE_DIGITS, REFERENCE_DIGITS), 0);
    }

    #[test]
    fn single_altered_character() {
        let mut altered = REFERENCE_DIGITS.to_string();
        altered.replace_range(50..51, "0");
        assert_ne!(altered, REFERENCE_DIGITS);
        assert_eq!(count_digit_differences(&altered, REFERENCE_DIGITS), 1);
    }

    #[test]
    fn shorter_computed_compares_prefix_only() {
        assert_eq!(count_digit_differences("3.14", REFERENCE_DIGITS), 0);
        assert_eq!(count_digit_differences("3.15", REFERENCE_DIGITS), 1);
        assert_eq!(count_digit_differences("", REFERENCE_DIGITS), 0);
    }

    #[test]
    fn longer_computed_compares_prefix_only() {
        assert_eq!(count_digit_differences("3.14159999", "3.14159"), 0);
    }

    #[test]
    fn no_alignment_is_performed() {
        // A shifted rendering mismatches positionally.
        assert_eq!(count_digit_differences("03.14", "3.141"), 5);
    }

    #[test]
    fn render_truncates_instead_of_rounding() {
        let ctx = ArithmeticContext::new(Precision::new(10).unwrap());
        // 2/3 renders as 0.666666667 at 10 digits, then truncates to 5 chars
        let rendered = render_total(&ctx.ratio(2, 3), ctx.precision(), 5);
        assert_eq!(rendered, "0.666");
    }

    #[test]
    fn verify_reports_mismatches() {
        let ctx = ArithmeticContext::default();
        let report = verify(&ctx.integer(3), ctx.precision());
        assert_eq!(report.computed.len(), REFERENCE_DIGITS.len());
        assert!(report.computed.starts_with("3.000"));
        assert!(!report.is_exact());
        assert_eq!(report.known, REFERENCE_DIGITS);
    }

    #[test]
    fn verify_against_custom_reference() {
        let ctx = ArithmeticContext::new(Precision::new(8).unwrap());
        let report = verify_against(&ctx.ratio(1, 4), ctx.precision(), "0.25000");
        assert!(report.is_exact());
    }

    #[test]
    fn report_serializes() {
        let report = VerificationReport {
            computed: "3.14".into(),
            known: "3.14".into(),
            differing_digits: 0,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"differing_digits\":0"));
    }
}
