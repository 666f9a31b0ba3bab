// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ascending scan that turns the sieve and the frontier into ψ(n).
//!
//! For n = 2, 3, …, max_n:
//!
//! ```text
//!            ┌─ prime ──────▶ frontier.insert_prime_powers(n) ─▶ ψ += ln n
//! sieve[n] ──┤
//!            └─ not prime ──▶ frontier.try_consume(n) ─────────▶ ψ += ln p  (n = p^k)
//!                                                              └▶ ψ += 0     (otherwise)
//!
//! ratio = ψ / n;   exp(ratio) ∉ band  ⇒  last_departure = n
//! ```
//!
//! The scanner owns its sieve, so dropping the scanner (after a finished run
//! or a failed one) releases the table.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ReferenceBand, ScanConfig};
use crate::error::ScanError;
use crate::frontier::PrimePowerFrontier;
use crate::sieve::BitSieve;
use crate::verify::contracts::{check_no_missed_power, check_psi_monotonic};

/// What n contributed to ψ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// n is prime: contributes ln n.
    Prime,
    /// n = p^k with k ≥ 2: contributes ln p.
    PrimePower,
    /// Not a prime power: contributes nothing.
    Other,
}

/// The state of the scan right after visiting `n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanStep {
    pub n: u64,
    pub kind: StepKind,
    /// Von Mangoldt weight of n (0 for non-prime-powers).
    pub weight: f64,
    /// ψ(n)
    pub psi: f64,
    /// ψ(n) / n
    pub ratio: f64,
    /// Whether exp(ratio) lies strictly inside the band.
    pub in_band: bool,
}

/// Running totals, updated once per visited integer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningState {
    /// ψ of the last visited n.
    pub psi: f64,
    /// Most recent n whose ratio left the band. `None`: never left.
    pub last_departure: Option<u64>,
    pub departures: u64,
    pub primes: u64,
    pub prime_powers: u64,
}

/// Final result of a scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub max_n: u64,
    /// ψ(max_n)
    pub psi: f64,
    pub last_departure: Option<u64>,
    /// How many n in [2, max_n] fell outside the band.
    pub departures: u64,
    /// Primes ≤ max_n.
    pub primes: u64,
    /// p^k ≤ max_n with k ≥ 2.
    pub prime_powers: u64,
    /// Largest live frontier size during the scan.
    pub frontier_peak: usize,
    pub band_lower: f64,
    pub band_upper: f64,
}

/// Walks n = 2..=max_n once, in order, feeding ψ.
///
/// Iterating yields one [`ScanStep`] per n. After an error the iterator is
/// exhausted.
///
/// ```ignore
/// let report = ChebyshevScanner::new(10, ScanConfig::default())?.run()?;
/// assert_eq!(report.last_departure, Some(10));
/// ```
#[derive(Debug)]
pub struct ChebyshevScanner {
    sieve: BitSieve,
    frontier: PrimePowerFrontier,
    band: ReferenceBand,
    state: RunningState,
    max_n: u64,
    next: u64,
    failed: bool,
}

impl ChebyshevScanner {
    /// Build the sieve for `max_n` and an empty frontier.
    pub fn new(max_n: u64, config: ScanConfig) -> Result<Self, ScanError> {
        let sieve = BitSieve::new(max_n)?;
        debug!(max_n, bytes = sieve.byte_len(), "scanner ready");

        Ok(Self {
            sieve,
            frontier: PrimePowerFrontier::with_capacity(config.frontier_capacity),
            band: config.band,
            state: RunningState::default(),
            max_n,
            next: 2,
            failed: false,
        })
    }

    /// Visit the next integer. `None` once max_n has been visited.
    fn step(&mut self) -> Option<Result<ScanStep, ScanError>> {
        if self.failed || self.next > self.max_n {
            return None;
        }
        let n = self.next;
        self.next += 1;

        let (kind, weight) = if self.sieve.is_prime(n) {
            match self.frontier.insert_prime_powers(n, self.max_n) {
                Ok(log_n) => (StepKind::Prime, log_n),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        } else {
            match self.frontier.try_consume(n) {
                Some(log_p) => (StepKind::PrimePower, log_p),
                None => (StepKind::Other, 0.0),
            }
        };
        check_no_missed_power(&self.frontier, n);

        let before = self.state.psi;
        self.state.psi += weight;
        check_psi_monotonic(before, self.state.psi, n);

        match kind {
            StepKind::Prime => self.state.primes += 1,
            StepKind::PrimePower => self.state.prime_powers += 1,
            StepKind::Other => {}
        }

        let ratio = self.state.psi / n as f64;
        let in_band = self.band.contains_exp(ratio);
        if !in_band {
            self.state.last_departure = Some(n);
            self.state.departures += 1;
        }

        Some(Ok(ScanStep {
            n,
            kind,
            weight,
            psi: self.state.psi,
            ratio,
            in_band,
        }))
    }

    /// Drain the scan and report. Consumes the scanner, releasing the sieve.
    pub fn run(mut self) -> Result<ScanReport, ScanError> {
        info!(max_n = self.max_n, "scan started");
        for step in self.by_ref() {
            step?;
        }
        let report = self.report();
        info!(
            max_n = report.max_n,
            psi = report.psi,
            last_departure = ?report.last_departure,
            "scan finished"
        );
        Ok(report)
    }

    /// Snapshot of the totals so far.
    pub fn report(&self) -> ScanReport {
        ScanReport {
            max_n: self.max_n,
            psi: self.state.psi,
            last_departure: self.state.last_departure,
            departures: self.state.departures,
            primes: self.state.primes,
            prime_powers: self.state.prime_powers,
            frontier_peak: self.frontier.peak(),
            band_lower: self.band.lower(),
            band_upper: self.band.upper(),
        }
    }

    pub fn state(&self) -> &RunningState {
        &self.state
    }

    pub fn frontier(&self) -> &PrimePowerFrontier {
        &self.frontier
    }

    pub fn max_n(&self) -> u64 {
        self.max_n
    }

    /// Integers left to visit.
    pub fn remaining(&self) -> u64 {
        if self.failed {
            0
        } else {
            (self.max_n + 1).saturating_sub(self.next)
        }
    }
}

impl Iterator for ChebyshevScanner {
    type Item = Result<ScanStep, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (0, Some(left))
    }
}

impl std::iter::FusedIterator for ChebyshevScanner {}

/// Scan `[2, max_n]` with `config` and report.
pub fn scan(max_n: u64, config: ScanConfig) -> Result<ScanReport, ScanError> {
    ChebyshevScanner::new(max_n, config)?.run()
}
