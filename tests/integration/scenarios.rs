//! The concrete scenarios the probe is expected to reproduce.

use super::common::{assert_psi_close, collect_steps};
use psiscan::{scan, ChebyshevScanner, ReferenceBand, ScanConfig, StepKind};

#[test]
fn scenario_max_n_ten() {
    let report = scan(10, ScanConfig::default()).unwrap();
    let expected = 3.0 * 2f64.ln() + 2.0 * 3f64.ln() + 5f64.ln() + 7f64.ln();

    assert_psi_close(report.psi, expected, 10);
    assert!((report.psi - 7.832015).abs() < 1e-6);

    let ratio = report.psi / 10.0;
    assert!((ratio - 0.7832015).abs() < 1e-6);
    assert!((ratio.exp() - 2.1884).abs() < 1e-4);
    assert_eq!(report.last_departure, Some(10));
}

#[test]
fn scenario_max_n_one() {
    let report = scan(1, ScanConfig::default()).unwrap();
    assert_eq!(report.psi, 0.0);
    assert_eq!(report.last_departure, None);
    assert_eq!(report.primes, 0);
    assert_eq!(report.frontier_peak, 0);
}

#[test]
fn scenario_max_n_zero() {
    let report = scan(0, ScanConfig::default()).unwrap();
    assert_eq!(report.psi, 0.0);
    assert_eq!(report.last_departure, None);
}

#[test]
fn scenario_max_n_three() {
    let steps = collect_steps(3);
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].n, 2);
    assert_eq!(steps[0].psi, 2f64.ln());
    assert_eq!(steps[1].n, 3);
    assert_eq!(steps[1].psi, 2f64.ln() + 3f64.ln());
    assert!(steps.iter().all(|s| s.kind != StepKind::PrimePower));

    let report = scan(3, ScanConfig::default()).unwrap();
    assert_eq!(report.prime_powers, 0);
    assert_eq!(report.frontier_peak, 0);
}

#[test]
fn scenario_small_n_always_departs() {
    // exp(ψ(n)/n) never lands in the narrow default band this early
    let steps = collect_steps(200);
    assert!(steps.iter().all(|s| !s.in_band));
    assert_eq!(scan(200, ScanConfig::default()).unwrap().departures, 199);
}

#[test]
fn scenario_band_around_ratio_enters_and_leaves() {
    // exp(ψ(n)/n) for n ≤ 1000 wanders between about 1.4 and 2.83
    let band = ReferenceBand::new(2.5, 2.7).unwrap();
    let steps = super::common::collect_steps_with(1_000, ScanConfig::default().with_band(band));
    let inside = steps.iter().filter(|s| s.in_band).count();
    assert!(inside > 0, "band never entered");
    assert!(inside < steps.len(), "band never left");

    for step in &steps {
        let e = step.ratio.exp();
        let strictly_inside = 2.5 < e && e < 2.7;
        // the log-space test can only differ from the exp test at the edges
        if (e - 2.5).abs() > 1e-12 && (e - 2.7).abs() > 1e-12 {
            assert_eq!(step.in_band, strictly_inside, "n={}", step.n);
        }
    }
}

#[test]
fn scenario_determinism_large() {
    let a = scan(200_000, ScanConfig::default()).unwrap();
    let b = scan(200_000, ScanConfig::default()).unwrap();
    assert_eq!(a.psi.to_bits(), b.psi.to_bits());
    assert_eq!(a.last_departure, b.last_departure);
    assert_eq!(a, b);
}

#[test]
fn scenario_psi_over_n_approaches_one() {
    let report = scan(1_000_000, ScanConfig::default()).unwrap();
    let ratio = report.psi / 1_000_000.0;
    assert!((ratio - 1.0).abs() < 0.01, "ψ(10^6)/10^6 = {}", ratio);
    assert_eq!(report.primes, 78_498);
}

#[test]
fn scenario_scanner_is_fused_after_end() {
    let mut scanner = ChebyshevScanner::new(5, ScanConfig::default()).unwrap();
    assert_eq!(scanner.by_ref().count(), 4);
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
}
