// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for textual bound parsing.
//!
//! Garbage in must give `InvalidBound`, never a panic, and anything accepted
//! must be exactly the digits that were typed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use psiscan::{parse_bound, ScanError};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    match parse_bound(text) {
        Ok(value) => {
            let digits: String = text.trim().chars().filter(|&c| c != '_').collect();
            assert_eq!(digits.parse::<u64>().ok(), Some(value));
        }
        Err(ScanError::InvalidBound { .. }) => {}
        Err(other) => panic!("unexpected error kind: {}", other),
    }
});
