// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for arbitrary interleavings of frontier inserts and consumes.
//!
//! The scan only ever inserts primes in ascending order, but the frontier
//! promises more: whatever primes arrive in whatever order, the live range
//! stays sorted, capacity is honoured, and consumption only takes the front.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use psiscan::testing::is_prime_naive;
use psiscan::{FrontierCapacity, PrimePowerFrontier, ScanError};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(u16),
    Consume(u32),
    ConsumeFront,
}

#[derive(Arbitrary, Debug)]
struct Input {
    max_n: u32,
    capacity: Option<u8>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let max_n = u64::from(input.max_n);
    let capacity = match input.capacity {
        Some(cap) => FrontierCapacity::Bounded(usize::from(cap)),
        None => FrontierCapacity::Unbounded,
    };
    let mut frontier = PrimePowerFrontier::with_capacity(capacity);

    for op in input.ops.iter().take(256) {
        let cursor = frontier.cursor();
        match *op {
            Op::Insert(p) => {
                let p = u64::from(p);
                if !is_prime_naive(p) {
                    continue;
                }
                match frontier.insert_prime_powers(p, max_n) {
                    Ok(weight) => assert_eq!(weight, (p as f64).ln()),
                    Err(ScanError::FrontierOverflow { capacity: cap, .. }) => {
                        assert_eq!(Some(cap), capacity.limit());
                        assert_eq!(frontier.len(), cap);
                    }
                    Err(other) => panic!("unexpected error: {}", other),
                }
            }
            Op::Consume(v) => {
                let front = frontier.peek().map(|e| e.value);
                let hit = frontier.try_consume(u64::from(v));
                assert_eq!(hit.is_some(), front == Some(u64::from(v)));
            }
            Op::ConsumeFront => {
                if let Some(front) = frontier.peek().map(|e| e.value) {
                    assert!(frontier.try_consume(front).is_some());
                }
            }
        }

        // Property 1: cursor never moves backwards
        assert!(frontier.cursor() >= cursor);
        // Property 2: live entries strictly ascending and in range
        let live = frontier.live();
        assert!(live.windows(2).all(|w| w[0].value < w[1].value));
        assert!(live.iter().all(|e| e.value <= max_n));
        // Property 3: capacity respected
        if let Some(cap) = capacity.limit() {
            assert!(frontier.len() <= cap);
        }
    }
});
