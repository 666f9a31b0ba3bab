// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The prime power frontier: higher powers of primes we have already met,
//! queued in the order the scan will reach them.
//!
//! When the scan discovers a prime p it registers p², p³, … up to `max_n` right
//! away. Those values all lie ahead of the scan (p² > p), so they slot in after
//! the cursor. As the scan walks n upward it only ever looks at the entry under
//! the cursor: if that entry equals n, n is a prime power and gets ln p.
//!
//! ```text
//!   dead (consumed)     live (ascending)
//! ┌────┬────┬────┐┌────┬────┬────┬─────┬─────┐
//! │  4 │  8 │  9 ││ 16 │ 25 │ 27 │  32 │  49 │
//! └────┴────┴────┘└────┴────┴────┴─────┴─────┘
//!                  ▲ cursor
//! ```
//!
//! # Front-only consumption
//!
//! Live entries are strictly ascending and the scan visits every integer in
//! increasing order, so the smallest unconsumed power is always under the
//! cursor by the time n reaches it. Nothing is ever searched at consume time.
//!
//! # Cost
//!
//! Insertion is a binary search over the live range plus a shift. The number
//! of insertions over a whole run is the number of p^k ≤ max_n with k ≥ 2,
//! roughly √max_n / ln √max_n, so the shifts stay cheap.

use serde::Serialize;
use tracing::trace;

use crate::config::FrontierCapacity;
use crate::error::ScanError;
use crate::verify::contracts::{check_cursor_advanced, check_frontier_sorted};

/// A queued prime power p^k (k ≥ 2) with the weight it contributes to ψ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimePowerEntry {
    /// p^k
    pub value: u64,
    /// ln p
    pub log_weight: f64,
}

/// Ascending queue of not-yet-reached prime powers with a consumption cursor.
#[derive(Debug, Clone)]
pub struct PrimePowerFrontier {
    entries: Vec<PrimePowerEntry>,
    cursor: usize,
    capacity: FrontierCapacity,
    peak: usize,
}

impl PrimePowerFrontier {
    /// Empty frontier with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(FrontierCapacity::default())
    }

    /// Empty frontier with an explicit capacity.
    pub fn with_capacity(capacity: FrontierCapacity) -> Self {
        let reserve = capacity.limit().unwrap_or(0).min(1 << 16);
        Self {
            entries: Vec::with_capacity(reserve),
            cursor: 0,
            capacity,
            peak: 0,
        }
    }

    /// Register the higher powers of a newly discovered prime.
    ///
    /// Inserts (p^k, ln p) for k = 2, 3, … while p^k ≤ `max_n`, each at its
    /// sorted position among the live entries. Returns ln p: the weight p
    /// contributes as a first power, which the caller adds itself since the
    /// frontier only holds exponents ≥ 2.
    ///
    /// Fails with [`ScanError::FrontierOverflow`] if the capacity would be
    /// exceeded. Powers inserted before the failure stay in place; the caller
    /// is expected to abandon the scan.
    pub fn insert_prime_powers(&mut self, prime: u64, max_n: u64) -> Result<f64, ScanError> {
        let log_p = (prime as f64).ln();

        let mut power = prime.checked_mul(prime);
        let mut inserted = 0usize;
        while let Some(value) = power.filter(|&v| v <= max_n) {
            self.insert_sorted(PrimePowerEntry {
                value,
                log_weight: log_p,
            })?;
            inserted += 1;
            power = value.checked_mul(prime);
        }

        if inserted > 0 {
            trace!(prime, inserted, live = self.len(), "registered prime powers");
        }
        Ok(log_p)
    }

    fn insert_sorted(&mut self, entry: PrimePowerEntry) -> Result<(), ScanError> {
        if !self.capacity.admits(self.len()) {
            return Err(ScanError::FrontierOverflow {
                capacity: self.capacity.limit().unwrap_or(self.len()),
                value: entry.value,
            });
        }

        let pos = self.cursor
            + self.entries[self.cursor..].partition_point(|e| e.value < entry.value);
        self.entries.insert(pos, entry);
        self.peak = self.peak.max(self.len());

        check_frontier_sorted(self);
        Ok(())
    }

    /// Consume the front entry if it equals `value`.
    ///
    /// Returns `Some(ln p)` when `value` is the next queued prime power and
    /// advances the cursor; `None` otherwise (no contribution to ψ).
    #[inline]
    pub fn try_consume(&mut self, value: u64) -> Option<f64> {
        let entry = self.entries.get(self.cursor)?;
        if entry.value != value {
            return None;
        }

        let weight = entry.log_weight;
        let before = self.cursor;
        self.cursor += 1;
        check_cursor_advanced(before, self.cursor);
        Some(weight)
    }

    /// The next entry due, if any.
    pub fn peek(&self) -> Option<&PrimePowerEntry> {
        self.entries.get(self.cursor)
    }

    /// Unconsumed entries in ascending order.
    pub fn live(&self) -> &[PrimePowerEntry] {
        &self.entries[self.cursor..]
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the next entry due. Never decreases.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entries held in storage, consumed ones included.
    pub fn stored(&self) -> usize {
        self.entries.len()
    }

    /// Largest live size seen so far.
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn capacity(&self) -> FrontierCapacity {
        self.capacity
    }
}

impl Default for PrimePowerFrontier {
    fn default() -> Self {
        Self::new()
    }
}
