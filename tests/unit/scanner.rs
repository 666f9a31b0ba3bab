//! ChebyshevScanner step-by-step behaviour.

use super::common::{collect_steps, psi_table};
use psiscan::{scan, ChebyshevScanner, ScanConfig, StepKind};

#[test]
fn scanner_visits_every_n_once_in_order() {
    let steps = collect_steps(300);
    let ns: Vec<u64> = steps.iter().map(|s| s.n).collect();
    assert_eq!(ns, (2..=300).collect::<Vec<_>>());
}

#[test]
fn scanner_weight_matches_von_mangoldt() {
    for step in collect_steps(2_000) {
        let expected = psiscan::testing::von_mangoldt(step.n);
        assert_eq!(step.weight, expected, "Λ({})", step.n);
        match step.kind {
            StepKind::Other => assert_eq!(step.weight, 0.0),
            StepKind::Prime | StepKind::PrimePower => assert!(step.weight > 0.0),
        }
    }
}

#[test]
fn scanner_psi_is_bitwise_equal_to_ordered_sum() {
    let table = psi_table(10_000);
    for step in collect_steps(10_000) {
        assert_eq!(step.psi, table[step.n as usize], "ψ({})", step.n);
        assert_eq!(step.ratio, step.psi / step.n as f64);
    }
}

#[test]
fn scanner_last_departure_is_most_recent() {
    let steps = collect_steps(5_000);
    let expected = steps.iter().rev().find(|s| !s.in_band).map(|s| s.n);
    let report = scan(5_000, ScanConfig::default()).unwrap();
    assert_eq!(report.last_departure, expected);
    assert_eq!(
        report.departures,
        steps.iter().filter(|s| !s.in_band).count() as u64
    );
}

#[test]
fn scanner_counts_primes_and_powers() {
    let report = scan(1_000, ScanConfig::default()).unwrap();
    assert_eq!(report.primes, 168);
    assert_eq!(
        report.prime_powers,
        psiscan::testing::higher_prime_powers(1_000).len() as u64
    );
}

#[test]
fn scanner_report_midway() {
    let mut scanner = ChebyshevScanner::new(100, ScanConfig::default()).unwrap();
    for _ in 0..9 {
        scanner.next().unwrap().unwrap();
    }
    // visited 2..=10
    assert_eq!(scanner.remaining(), 90);
    assert_eq!(scanner.state().last_departure, Some(10));
    assert_eq!(scanner.report().primes, 4);
}

#[test]
fn scanner_size_hint_tracks_remaining() {
    let mut scanner = ChebyshevScanner::new(20, ScanConfig::default()).unwrap();
    assert_eq!(scanner.size_hint(), (0, Some(19)));
    scanner.next();
    assert_eq!(scanner.size_hint(), (0, Some(18)));
}
