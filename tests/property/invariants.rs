//! Frontier and scan invariants under random inputs.

use proptest::prelude::*;
use psiscan::{
    BitSieve, ChebyshevScanner, FrontierCapacity, PrimePowerFrontier, ScanConfig,
};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Small primes in random order, for inserting out of scan order.
fn prime_subset_strategy() -> impl Strategy<Value = Vec<u64>> {
    let primes: Vec<u64> = BitSieve::new(200).unwrap().primes().collect();
    prop::sample::subsequence(primes, 0..20).prop_shuffle()
}

fn is_strictly_ascending(frontier: &PrimePowerFrontier) -> bool {
    frontier.live().windows(2).all(|w| w[0].value < w[1].value)
}

// ============================================================================
// FRONTIER INVARIANTS
// ============================================================================

proptest! {
    /// Property: live entries stay strictly ascending whatever the insert order.
    #[test]
    fn prop_frontier_sorted_after_any_insert_order(
        primes in prime_subset_strategy(),
        max_n in 4u64..100_000,
    ) {
        let mut frontier = PrimePowerFrontier::with_capacity(FrontierCapacity::Unbounded);
        for p in primes {
            frontier.insert_prime_powers(p, max_n).unwrap();
            prop_assert!(is_strictly_ascending(&frontier));
        }
    }

    /// Property: every stored value is p^k with k ≥ 2 and ≤ max_n.
    #[test]
    fn prop_frontier_values_in_range(
        primes in prime_subset_strategy(),
        max_n in 4u64..100_000,
    ) {
        let mut frontier = PrimePowerFrontier::with_capacity(FrontierCapacity::Unbounded);
        for p in primes {
            frontier.insert_prime_powers(p, max_n).unwrap();
        }
        for entry in frontier.live() {
            prop_assert!(entry.value <= max_n);
            let decomposition = psiscan::testing::prime_power_decomposition(entry.value);
            prop_assert!(matches!(decomposition, Some((_, k)) if k >= 2));
        }
    }

    /// Property: sortedness and cursor monotonicity hold through a full scan.
    #[test]
    fn prop_scan_keeps_frontier_invariants(max_n in 0u64..20_000) {
        let mut scanner = ChebyshevScanner::new(max_n, ScanConfig::default()).unwrap();
        let mut last_cursor = 0;
        while let Some(step) = scanner.next() {
            let step = step.unwrap();
            let frontier = scanner.frontier();
            prop_assert!(is_strictly_ascending(frontier));
            prop_assert!(frontier.cursor() >= last_cursor);
            if let Some(front) = frontier.peek() {
                prop_assert!(front.value > step.n, "missed {} at n={}", front.value, step.n);
            }
            last_cursor = frontier.cursor();
        }
        prop_assert!(scanner.frontier().is_empty());
    }

    /// Property: a bounded frontier either fits or fails with overflow, never
    /// silently drops entries.
    #[test]
    fn prop_bounded_capacity_never_truncates(max_n in 4u64..5_000, cap in 0usize..40) {
        let config = ScanConfig::default()
            .with_frontier_capacity(FrontierCapacity::Bounded(cap));
        let unbounded = psiscan::scan(max_n, ScanConfig::default()).unwrap();
        match psiscan::scan(max_n, config) {
            Ok(report) => {
                prop_assert!(report.frontier_peak <= cap);
                prop_assert_eq!(report.psi, unbounded.psi);
            }
            Err(e) => {
                prop_assert!(e.is_fatal());
                prop_assert!(unbounded.frontier_peak > cap);
            }
        }
    }
}

// ============================================================================
// SCAN INVARIANTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: ψ never decreases and the ratio is ψ/n.
    #[test]
    fn prop_psi_monotonic(max_n in 2u64..10_000) {
        let mut previous = 0.0;
        for step in ChebyshevScanner::new(max_n, ScanConfig::default()).unwrap() {
            let step = step.unwrap();
            prop_assert!(step.psi >= previous);
            previous = step.psi;
        }
    }

    /// Property: two runs with the same bound agree bit for bit.
    #[test]
    fn prop_scan_deterministic(max_n in 0u64..10_000) {
        let a = psiscan::scan(max_n, ScanConfig::default()).unwrap();
        let b = psiscan::scan(max_n, ScanConfig::default()).unwrap();
        prop_assert_eq!(a.psi.to_bits(), b.psi.to_bits());
        prop_assert_eq!(a.last_departure, b.last_departure);
    }
}
