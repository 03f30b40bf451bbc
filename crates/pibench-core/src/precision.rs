//! Working precision and the immutable arithmetic context.
//!
//! The context is created once per run and shared by reference with every
//! worker, so all partial sums are produced at the same number of bits.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::Serialize;

use crate::constants::{DECIMAL_DIGITS, GUARD_BITS};
use crate::fixed::FixedPoint;
use crate::kernel::PiError;

/// log2(10) scaled by 10^9, rounded up.
const LOG2_10_SCALED: u64 = 3_321_928_095;
const LOG2_10_SCALE: u64 = 1_000_000_000;

/// Decimal digits of working precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Precision {
    decimal_digits: u32,
}

impl Precision {
    /// Create a precision of `decimal_digits` significant digits.
    pub fn new(decimal_digits: u32) -> Result<Self, PiError> {
        if decimal_digits == 0 {
            return Err(PiError::Config(
                "precision must be at least one decimal digit".into(),
            ));
        }
        Ok(Self { decimal_digits })
    }

    /// Number of significant decimal digits.
    #[must_use]
    pub fn decimal_digits(self) -> u32 {
        self.decimal_digits
    }

    /// Binary digits carried by fixed-point values at this precision.
    ///
    /// `ceil((digits + 1) * log2(10)) + GUARD_BITS`; 375 bits for 102 digits.
    #[must_use]
    pub fn working_bits(self) -> u64 {
        let digits = u64::from(self.decimal_digits) + 1;
        (digits * LOG2_10_SCALED).div_ceil(LOG2_10_SCALE) + GUARD_BITS
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            decimal_digits: DECIMAL_DIGITS,
        }
    }
}

/// Immutable arithmetic context bound to one [`Precision`].
///
/// # Example
/// ```
/// use pibench_core::precision::{ArithmeticContext, Precision};
///
/// let ctx = ArithmeticContext::new(Precision::default());
/// assert_eq!(ctx.bits(), 375);
/// let half = ctx.ratio(1, 2);
/// assert_eq!(half.to_decimal_string(3), "0.50");
/// ```
#[derive(Debug, Clone)]
pub struct ArithmeticContext {
    precision: Precision,
    bits: u64,
    unit: BigInt,
}

impl ArithmeticContext {
    /// Bind a new context to `precision`.
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        let bits = precision.working_bits();
        Self {
            precision,
            bits,
            unit: BigInt::one() << bits,
        }
    }

    /// The precision this context was created with.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Fractional bits of every value produced by this context.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Fixed-point zero.
    #[must_use]
    pub fn zero(&self) -> FixedPoint {
        FixedPoint::from_raw(BigInt::zero(), self.bits)
    }

    /// Fixed-point value of an integer.
    #[must_use]
    pub fn integer(&self, value: i64) -> FixedPoint {
        FixedPoint::from_raw(&self.unit * BigInt::from(value), self.bits)
    }

    /// `numerator / denominator`, floored to the working precision.
    ///
    /// `denominator` must be non-zero.
    #[must_use]
    pub fn ratio(&self, numerator: i64, denominator: u128) -> FixedPoint {
        debug_assert!(denominator != 0, "ratio with zero denominator");
        let scaled = &self.unit * BigInt::from(numerator);
        FixedPoint::from_raw(scaled.div_floor(&BigInt::from(denominator)), self.bits)
    }
}

impl Default for ArithmeticContext {
    fn default() -> Self {
        Self::new(Precision::default())
    }
}
