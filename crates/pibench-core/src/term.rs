//! Term Evaluator for the base-16 BBP series.
//!
//! ```text
//! term(i) = 16^-i * (4/(8i+1) - 2/(8i+4) - 1/(8i+5) - 1/(8i+6))
//! ```
//!
//! Every division is floored at the context's working precision and the
//! `16^-i` scaling is a floored right shift by `4i` bits, so no operation
//! passes through machine floating point.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::fixed::FixedPoint;
use crate::precision::ArithmeticContext;

/// Compute the series term for `index` at the precision of `ctx`.
///
/// # Example
/// ```
/// use pibench_core::precision::ArithmeticContext;
/// use pibench_core::term::term;
///
/// let ctx = ArithmeticContext::default();
/// // term(0) = 4 - 1/2 - 1/5 - 1/6 = 47/15
/// assert!(term(&ctx, 0).to_decimal_string(6).starts_with("3.1333"));
/// ```
#[must_use]
pub fn term(ctx: &ArithmeticContext, index: u64) -> FixedPoint {
    let k = 8 * u128::from(index);
    let st = ctx.ratio(4, k + 1);
    let nd = ctx.ratio(2, k + 4);
    let rd = ctx.ratio(1, k + 5);
    let th = ctx.ratio(1, k + 6);

    let bracket = st.into_mantissa() - nd.mantissa() - rd.mantissa() - th.mantissa();
    FixedPoint::from_raw(bracket >> index.saturating_mul(4), ctx.bits())
}

/// Sum `term(i)` for every `i` in `[0, n)`, in increasing index order.
#[must_use]
pub fn sum_terms(ctx: &ArithmeticContext, n: u64) -> FixedPoint {
    let total = (0..n).fold(BigInt::zero(), |acc, i| acc + term(ctx, i).into_mantissa());
    FixedPoint::from_raw(total, ctx.bits())
}
