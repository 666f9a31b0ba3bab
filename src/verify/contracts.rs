// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-mode assertions for the scan pipeline.
//!
//! 1. Are **zero-cost in release builds** (`debug_assert!` only)
//! 2. Provide **early failure detection** during development
//! 3. Name the invariant they guard in the panic message
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function          | Invariant                                      |
//! |----------------------------|------------------------------------------------|
//! | `check_sieve_bootstrap`    | 0 and 1 are not prime, 2 and 3 are             |
//! | `check_frontier_sorted`    | live entries strictly ascending by value       |
//! | `check_cursor_advanced`    | cursor never moves backwards                   |
//! | `check_no_missed_power`    | no live entry lies behind the scan position    |
//! | `check_psi_monotonic`      | ψ never decreases                              |

use crate::frontier::PrimePowerFrontier;
use crate::sieve::BitSieve;

// ============================================================================
// SIEVE CONTRACTS
// ============================================================================

/// Check the first storage byte after construction.
///
/// # Panics (debug builds only)
/// Panics if 0 or 1 is marked prime, or 2 or 3 (when covered) is not.
#[inline]
pub fn check_sieve_bootstrap(sieve: &BitSieve) {
    debug_assert!(
        !sieve.is_prime(0),
        "Contract violation: Sieve.bootstrap - 0 marked prime"
    );
    if sieve.limit() >= 1 {
        debug_assert!(
            !sieve.is_prime(1),
            "Contract violation: Sieve.bootstrap - 1 marked prime"
        );
    }
    for p in [2, 3] {
        if sieve.limit() >= p {
            debug_assert!(
                sieve.is_prime(p),
                "Contract violation: Sieve.bootstrap - {} not marked prime",
                p
            );
        }
    }
}

// ============================================================================
// FRONTIER CONTRACTS
// ============================================================================

/// Check that the live frontier is strictly ascending.
///
/// # Panics (debug builds only)
/// Panics at the first adjacent pair that is out of order or duplicated.
#[inline]
pub fn check_frontier_sorted(frontier: &PrimePowerFrontier) {
    if cfg!(debug_assertions) {
        let live = frontier.live();
        for i in 1..live.len() {
            debug_assert!(
                live[i - 1].value < live[i].value,
                "Contract violation: Frontier.sorted - live[{}]={} >= live[{}]={}",
                i - 1,
                live[i - 1].value,
                i,
                live[i].value
            );
        }
    }
}

/// Check that the cursor moved forward by exactly one.
#[inline]
pub fn check_cursor_advanced(before: usize, after: usize) {
    debug_assert!(
        after == before + 1,
        "Contract violation: Frontier.cursor_monotonic - {} -> {}",
        before,
        after
    );
}

/// Check that the scan has not skipped past a queued prime power.
///
/// Called after position `n` is processed: every live entry must still lie
/// strictly ahead of `n`.
///
/// # Panics (debug builds only)
/// Panics if the front entry is ≤ `n`; that power was never consumed and ψ is
/// short by its weight from here on.
#[inline]
pub fn check_no_missed_power(frontier: &PrimePowerFrontier, n: u64) {
    if let Some(front) = frontier.peek() {
        debug_assert!(
            front.value > n,
            "Contract violation: Frontier.no_missed_power - {} still queued at n={}",
            front.value,
            n
        );
    }
}

// ============================================================================
// SCAN CONTRACTS
// ============================================================================

/// Check that ψ did not decrease across a step.
#[inline]
pub fn check_psi_monotonic(before: f64, after: f64, n: u64) {
    debug_assert!(
        after >= before,
        "Contract violation: Scan.psi_monotonic - ψ went {} -> {} at n={}",
        before,
        after,
        n
    );
}
