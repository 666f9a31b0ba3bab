//! Differential testing: the streaming pipeline against brute-force oracles.
//!
//! Each optimized piece is compared with a simple definition-level
//! implementation. If they disagree, the oracle is right.

use super::common::{assert_psi_close, psi_by_definition, psi_table};
use proptest::prelude::*;
use psiscan::testing::{is_prime_naive, prime_power_decomposition};
use psiscan::{BitSieve, ChebyshevScanner, PrimePowerFrontier, ScanConfig, StepKind};

// =============================================================================
// SIEVE: bit-packed table vs trial division
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Differential test: every bit agrees with trial division.
    #[test]
    fn diff_sieve_vs_trial_division(limit in 0u64..3_000) {
        let sieve = BitSieve::new(limit).unwrap();
        for i in 0..=limit {
            prop_assert_eq!(sieve.is_prime(i), is_prime_naive(i), "i={}", i);
        }
    }
}

// =============================================================================
// FRONTIER: try_consume vs prime power decomposition
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Differential test: try_consume(v) hits iff v = p^k, k ≥ 2, v ≤ max_n.
    #[test]
    fn diff_consume_iff_higher_prime_power(max_n in 0u64..5_000) {
        let sieve = BitSieve::new(max_n).unwrap();
        let mut frontier = PrimePowerFrontier::new();
        for n in 2..=max_n {
            if sieve.is_prime(n) {
                frontier.insert_prime_powers(n, max_n).unwrap();
            } else {
                let hit = frontier.try_consume(n).is_some();
                let expected = matches!(prime_power_decomposition(n), Some((_, k)) if k >= 2);
                prop_assert_eq!(hit, expected, "n={}", n);
            }
        }
    }
}

// =============================================================================
// SCANNER: running ψ vs definition
// =============================================================================

/// ψ at every n ≤ 10,000 against the definition summed per prime.
#[test]
fn diff_psi_vs_definition_exhaustive() {
    let table = psi_table(10_000);
    let scanner = ChebyshevScanner::new(10_000, ScanConfig::default()).unwrap();
    for step in scanner {
        let step = step.unwrap();
        assert_eq!(step.psi, table[step.n as usize]);
    }
    // spot-check the per-prime summation too; it is quadratic, so sample
    for n in [2, 3, 4, 10, 97, 128, 1_000, 4_096, 10_000] {
        assert_psi_close(table[n as usize], psi_by_definition(n), n);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Differential test: step kinds agree with the decomposition oracle.
    #[test]
    fn diff_step_kind_vs_decomposition(max_n in 2u64..3_000) {
        for step in ChebyshevScanner::new(max_n, ScanConfig::default()).unwrap() {
            let step = step.unwrap();
            let expected = match prime_power_decomposition(step.n) {
                Some((_, 1)) => StepKind::Prime,
                Some(_) => StepKind::PrimePower,
                None => StepKind::Other,
            };
            prop_assert_eq!(step.kind, expected, "n={}", step.n);
        }
    }

    /// Differential test: final ψ vs the definition.
    #[test]
    fn diff_final_psi_vs_definition(max_n in 0u64..1_500) {
        let report = psiscan::scan(max_n, ScanConfig::default()).unwrap();
        assert_psi_close(report.psi, psi_by_definition(max_n), max_n);
    }
}
