// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reference oracles shared across unit tests, integration tests, and fuzz
//! targets.
//!
//! Slow, obviously-correct implementations straight from the definitions.
//! If the scanner and an oracle disagree, the oracle is right.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

/// Primality by trial division.
pub fn is_prime_naive(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Smallest prime factor of `n` (n ≥ 2).
fn smallest_factor(n: u64) -> u64 {
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return d;
        }
        d += 1;
    }
    n
}

/// `Some((p, k))` if `n = p^k` with p prime and k ≥ 1.
pub fn prime_power_decomposition(n: u64) -> Option<(u64, u32)> {
    if n < 2 {
        return None;
    }
    let p = smallest_factor(n);
    let mut rest = n;
    let mut k = 0;
    while rest % p == 0 {
        rest /= p;
        k += 1;
    }
    (rest == 1).then_some((p, k))
}

/// Von Mangoldt function Λ(n): ln p if n = p^k (k ≥ 1), else 0.
pub fn von_mangoldt(n: u64) -> f64 {
    prime_power_decomposition(n).map_or(0.0, |(p, _)| (p as f64).ln())
}

/// ψ(n) for every n in [0, max_n], summed in ascending order.
///
/// Summation order matches the scanner's, so the results are bitwise equal.
pub fn psi_table(max_n: u64) -> Vec<f64> {
    let mut table = Vec::with_capacity(max_n as usize + 1);
    let mut sum = 0.0;
    for n in 0..=max_n {
        sum += von_mangoldt(n);
        table.push(sum);
    }
    table
}

/// ψ(n) from the definition: Σ ln p over all p^k ≤ n.
///
/// Sums per prime rather than per integer, so it agrees with the scan only up
/// to floating-point rounding.
pub fn psi_by_definition(n: u64) -> f64 {
    let mut sum = 0.0;
    for p in (2..=n).filter(|&p| is_prime_naive(p)) {
        let log_p = (p as f64).ln();
        let mut power = p;
        loop {
            sum += log_p;
            match power.checked_mul(p) {
                Some(next) if next <= n => power = next,
                _ => break,
            }
        }
    }
    sum
}

/// Every p^k ≤ max_n with k ≥ 2, ascending.
pub fn higher_prime_powers(max_n: u64) -> Vec<u64> {
    (2..=max_n)
        .filter(|&n| matches!(prime_power_decomposition(n), Some((_, k)) if k >= 2))
        .collect()
}
