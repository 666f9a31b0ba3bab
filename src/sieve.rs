// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bit-packed Sieve of Eratosthenes.
//!
//! One bit per integer in [0, limit], least significant bit first: byte `i >> 3`
//! holds bit `i & 7`. A set bit means "prime". At 10^9 the whole table is
//! about 119 MiB, which makes memory, not CPU, the practical ceiling.
//!
//! ```text
//! byte 0:  7 6 5 4 3 2 1 0     byte 1:  15 14 13 12 11 10 9 8
//!          1 0 1 0 1 1 0 0              0  0  1  0  1  0  0 0
//! ```
//!
//! The table is built once and never mutated afterwards. `clear` is private to
//! construction; callers only get `is_prime`.

use tracing::debug;

use crate::error::ScanError;
use crate::verify::contracts::check_sieve_bootstrap;

/// Primality table for every integer in [0, limit].
#[derive(Debug, Clone)]
pub struct BitSieve {
    bits: Vec<u8>,
    limit: u64,
}

impl BitSieve {
    /// Allocate and run the sieve up to `limit` inclusive.
    ///
    /// Allocation is fallible: if `(limit >> 3) + 1` bytes cannot be reserved
    /// the error comes back as [`ScanError::SieveAllocation`] and no partial
    /// table is ever observable.
    pub fn new(limit: u64) -> Result<Self, ScanError> {
        let byte_len = (limit >> 3) + 1;
        let alloc_error = || ScanError::SieveAllocation {
            limit,
            bytes: byte_len,
        };

        let len = usize::try_from(byte_len).map_err(|_| alloc_error())?;
        let mut bits = Vec::new();
        bits.try_reserve_exact(len).map_err(|_| alloc_error())?;
        bits.resize(len, 0xFF);

        let mut sieve = Self { bits, limit };
        sieve.clear(0);
        sieve.clear(1);
        sieve.clear_tail();

        let mut i: u64 = 2;
        while i <= limit / i {
            if sieve.is_prime(i) {
                let mut j = i * i;
                while j <= limit {
                    sieve.clear(j);
                    j += i;
                }
            }
            i += 1;
        }

        check_sieve_bootstrap(&sieve);
        debug!(limit, bytes = len, "sieve built");
        Ok(sieve)
    }

    /// Is `i` prime?
    ///
    /// # Panics
    /// Panics if `i > limit`. The table says nothing about values it never
    /// covered.
    #[inline]
    pub fn is_prime(&self, i: u64) -> bool {
        assert!(
            i <= self.limit,
            "sieve query {} outside [0, {}]",
            i,
            self.limit
        );
        (self.bits[(i >> 3) as usize] >> (i & 7)) & 1 == 1
    }

    /// Like [`is_prime`](Self::is_prime) but `None` outside the table.
    #[inline]
    pub fn get(&self, i: u64) -> Option<bool> {
        (i <= self.limit).then(|| self.is_prime(i))
    }

    #[inline]
    fn clear(&mut self, i: u64) {
        self.bits[(i >> 3) as usize] &= !(1u8 << (i & 7));
    }

    /// Zero the bits of the last byte that lie past `limit`, so bulk
    /// operations over whole bytes never count phantom primes.
    fn clear_tail(&mut self) {
        let used = ((self.limit & 7) + 1) as u32;
        if used < 8 {
            let last = self.bits.len() - 1;
            self.bits[last] &= (1u8 << used) - 1;
        }
    }

    /// Largest value covered.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Bytes of backing storage.
    pub fn byte_len(&self) -> usize {
        self.bits.len()
    }

    /// Number of primes in [0, limit].
    pub fn count_primes(&self) -> u64 {
        self.bits.iter().map(|b| u64::from(b.count_ones())).sum()
    }

    /// Primes in ascending order.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.bits.iter().enumerate().flat_map(|(byte_idx, &byte)| {
            (0..8u64)
                .filter(move |bit| (byte >> bit) & 1 == 1)
                .map(move |bit| ((byte_idx as u64) << 3) + bit)
        })
    }
}
