//! Binary fixed-point values.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::kernel::PiError;

/// A value `mantissa / 2^bits`.
///
/// Addition is exact, so sums of fixed-point values do not depend on the
/// order or grouping of their operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint {
    mantissa: BigInt,
    bits: u64,
}

impl FixedPoint {
    /// Build a value from its raw mantissa.
    #[must_use]
    pub fn from_raw(mantissa: BigInt, bits: u64) -> Self {
        Self { mantissa, bits }
    }

    /// The scaled integer mantissa.
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Consume the value, returning its mantissa.
    #[must_use]
    pub fn into_mantissa(self) -> BigInt {
        self.mantissa
    }

    /// Number of fractional bits.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Whether the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    /// Add `other` in place; both values must carry the same number of bits.
    pub fn checked_add_assign(&mut self, other: &FixedPoint) -> Result<(), PiError> {
        if self.bits != other.bits {
            return Err(PiError::PrecisionMismatch {
                expected: self.bits,
                found: other.bits,
            });
        }
        self.mantissa += &other.mantissa;
        Ok(())
    }

    /// Sum of `self` and `other`; both values must carry the same number of bits.
    pub fn checked_add(&self, other: &FixedPoint) -> Result<FixedPoint, PiError> {
        let mut sum = self.clone();
        sum.checked_add_assign(other)?;
        Ok(sum)
    }

    /// Render with `significant_digits` decimal digits, rounding half up.
    ///
    /// Integer digits count towards the significant digits and are never
    /// dropped, so a request smaller than the integer part yields the
    /// rounded integer alone.
    #[must_use]
    pub fn to_decimal_string(&self, significant_digits: u32) -> String {
        let magnitude = self.mantissa.magnitude();
        let integer_part: BigUint = magnitude >> self.bits;
        let integer_digits = u32::try_from(integer_part.to_string().len()).unwrap_or(u32::MAX);
        let frac_digits = significant_digits.saturating_sub(integer_digits);

        let half = if self.bits == 0 {
            BigUint::zero()
        } else {
            BigUint::one() << (self.bits - 1)
        };
        let scaled: BigUint = (magnitude * BigUint::from(10u32).pow(frac_digits) + half) >> self.bits;

        let frac_len = frac_digits as usize;
        let mut digits = scaled.to_string();
        if digits.len() <= frac_len {
            digits = format!("{digits:0>width$}", width = frac_len + 1);
        }
        let split = digits.len() - frac_len;

        let mut out = String::with_capacity(digits.len() + 2);
        if self.is_negative() && !scaled.is_zero() {
            out.push('-');
        }
        out.push_str(&digits[..split]);
        if frac_len > 0 {
            out.push('.');
            out.push_str(&digits[split..]);
        }
        out
    }
}
