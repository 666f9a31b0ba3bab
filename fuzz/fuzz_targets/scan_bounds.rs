// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for whole scans over small bounds.
//!
//! Every step's ψ must equal the ordered von Mangoldt sum, and the reported
//! last departure must be the last out-of-band step.

#![no_main]

use libfuzzer_sys::fuzz_target;
use psiscan::testing::von_mangoldt;
use psiscan::{ChebyshevScanner, ReferenceBand, ScanConfig};

fuzz_target!(|input: (u16, f64, f64)| {
    let (max_n, lower, upper) = input;
    let max_n = u64::from(max_n % 8192);

    let Ok(band) = ReferenceBand::new(lower, upper) else {
        return;
    };
    let mut scanner = ChebyshevScanner::new(max_n, ScanConfig::default().with_band(band))
        .expect("small sieve allocates");

    let mut psi = 0.0;
    let mut last_departure = None;
    for step in scanner.by_ref() {
        let step = step.expect("default capacity fits bounds below 8192");
        psi += von_mangoldt(step.n);
        assert_eq!(step.psi, psi, "ψ({})", step.n);
        if !step.in_band {
            last_departure = Some(step.n);
        }
    }

    let report = scanner.report();
    assert_eq!(report.last_departure, last_departure);
    assert_eq!(report.psi, psi);
});
