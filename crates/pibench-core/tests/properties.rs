//! Property-based tests for partitioning and partial-sum combination.
//!
//! These exercise the kernel and partition functions directly, without any
//! scheduler in between.

use proptest::prelude::*;

use pibench_core::kernel::{BbpKernel, SeriesKernel};
use pibench_core::observers::NoOpObserver;
use pibench_core::partition::{owned_range, partition, verify_coverage};
use pibench_core::precision::{ArithmeticContext, Precision};
use pibench_core::term::sum_terms;
use pibench_core::verify::count_digit_differences;
use pibench_core::FixedPoint;

fn combine_partition(ctx: &ArithmeticContext, n: u64, workers: usize) -> FixedPoint {
    let kernel = BbpKernel::new();
    let observer = NoOpObserver::new();
    let mut total = ctx.zero();
    for range in partition(n, workers).unwrap() {
        let partial = kernel.partial_sum(ctx, &range, &observer).unwrap();
        total.checked_add_assign(&partial.value).unwrap();
    }
    total
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Concatenating every range yields each index of [0, n) exactly once.
    #[test]
    fn partition_covers_domain(n in 1u64..2_000, w in 1usize..64) {
        let w = w.min(n as usize);
        let ranges = partition(n, w).unwrap();
        prop_assert_eq!(ranges.len(), w);

        let indices: Vec<u64> = ranges.iter().flat_map(|r| r.iter()).collect();
        let expected: Vec<u64> = (0..n).collect();
        prop_assert_eq!(indices, expected);
        prop_assert!(verify_coverage(&ranges, n).is_ok());
    }

    /// No range is empty and only the last one may be longer than the others.
    #[test]
    fn partition_is_balanced(n in 1u64..5_000, w in 1usize..128) {
        let w = w.min(n as usize);
        let ranges = partition(n, w).unwrap();
        let chunk = n / w as u64;
        for range in &ranges[..w - 1] {
            prop_assert_eq!(range.len(), chunk);
        }
        prop_assert_eq!(ranges[w - 1].len(), chunk + n % w as u64);
        prop_assert!(ranges.iter().all(|r| !r.is_empty()));
    }

    /// Each rank derives the same range the full partition assigns it.
    #[test]
    fn owned_range_is_deterministic(n in 1u64..5_000, w in 1usize..32, rank_seed in 0usize..32) {
        let w = w.min(n as usize);
        let rank = rank_seed % w;
        prop_assert_eq!(owned_range(n, w, rank).unwrap(), partition(n, w).unwrap()[rank]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// The combined total does not depend on how the domain is split.
    #[test]
    fn total_is_partition_invariant(n in 1u64..400, w in 1usize..16) {
        let w = w.min(n as usize);
        let ctx = ArithmeticContext::default();
        prop_assert_eq!(combine_partition(&ctx, n, w), sum_terms(&ctx, n));
    }

    /// A single altered position is counted exactly once.
    #[test]
    fn single_change_counts_once(pos in 0usize..102) {
        let known = pibench_core::REFERENCE_DIGITS;
        let mut altered: Vec<char> = known.chars().collect();
        altered[pos] = if altered[pos] == '7' { '8' } else { '7' };
        let altered: String = altered.into_iter().collect();
        prop_assert_eq!(count_digit_differences(&altered, known), 1);
    }
}

#[test]
fn total_with_one_four_and_n_workers_agree() {
    let ctx = ArithmeticContext::new(Precision::default());
    let n = 1_000;
    let one = combine_partition(&ctx, n, 1);
    let four = combine_partition(&ctx, n, 4);
    let all = combine_partition(&ctx, n, n as usize);
    assert_eq!(one, four);
    assert_eq!(one, all);
}
