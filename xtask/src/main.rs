//! Custom cargo commands for the psiscan crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask fuzz [S]  - Run every fuzz target for S seconds (default 30)

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("fuzz") => {
            let secs = env::args()
                .nth(2)
                .map(|s| s.parse::<u32>())
                .transpose()
                .context("fuzz duration must be a number of seconds")?
                .unwrap_or(30);
            fuzz(secs)?
        }
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (contracts + tests + clippy + sizing)
  test      Run all Rust tests
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
  fuzz [S]  Run each fuzz target for S seconds (needs cargo-fuzz, nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("psiscan Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking contract markers...");
    check_contract_markers()?;
    println!("✓ Contract markers present\n");

    println!("[2/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Verifying default frontier capacity...");
    verify_frontier_capacity()?;
    println!("✓ Capacity covers 10^9\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Run every fuzz target for a bounded time
fn fuzz(secs: u32) -> Result<()> {
    let root = project_root()?;
    let targets = ["frontier_ops", "scan_bounds", "bound_parsing"];
    let max_time = format!("-max_total_time={}", secs);

    for (i, target) in targets.iter().enumerate() {
        println!("[{}/{}] fuzzing {} for {}s...", i + 1, targets.len(), target, secs);
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", &max_time])
            .current_dir(&root)
            .status()
            .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;
        if !status.success() {
            bail!("fuzz target {} failed", target);
        }
    }

    println!("\n✓ No fuzz failures");
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|_| env::current_dir())
        .context("Failed to locate project root")?;

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_contract_markers() -> Result<()> {
    let root = project_root()?;
    let contracts = std::fs::read_to_string(root.join("src/verify/contracts.rs"))
        .context("Failed to read src/verify/contracts.rs")?;

    let count = contracts.matches("Contract violation:").count();
    if count < 5 {
        bail!(
            "Expected at least 5 contract checks, found {}. Someone may have removed invariant checks!",
            count
        );
    }

    Ok(())
}

/// The default frontier capacity must hold every p^k (k ≥ 2) up to 10^9,
/// the largest bound the sieve is sized for.
fn verify_frontier_capacity() -> Result<()> {
    const LIMIT: u64 = 1_000_000_000;

    let root = project_root()?;
    let config_rs = std::fs::read_to_string(root.join("src/config.rs"))
        .context("Failed to read src/config.rs")?;
    let capacity = extract_const(&config_rs, "DEFAULT_FRONTIER_CAPACITY")
        .context("DEFAULT_FRONTIER_CAPACITY not found in src/config.rs")?;

    let needed = count_higher_prime_powers(LIMIT);
    if capacity < needed {
        bail!(
            "DEFAULT_FRONTIER_CAPACITY={} but {} prime powers lie below {}",
            capacity,
            needed,
            LIMIT
        );
    }
    println!("  capacity {} ≥ {} needed", capacity, needed);

    Ok(())
}

fn extract_const(content: &str, name: &str) -> Option<u64> {
    // Look for "pub const NAME: usize = 3700;"
    content
        .lines()
        .find(|line| line.contains(&format!("const {}:", name)))
        .and_then(|line| line.split('=').nth(1))
        .map(|rhs| rhs.trim().trim_end_matches(';').replace('_', ""))
        .and_then(|num| num.parse().ok())
}

/// Count p^k ≤ limit with k ≥ 2 using a plain byte sieve up to √limit.
fn count_higher_prime_powers(limit: u64) -> u64 {
    let root = (limit as f64).sqrt() as usize;
    let mut is_prime = vec![true; root + 1];
    let mut count = 0;

    for p in 2..=root {
        if !is_prime[p] {
            continue;
        }
        for multiple in (p * p..=root).step_by(p) {
            is_prime[multiple] = false;
        }
        let mut power = (p as u64) * (p as u64);
        while power <= limit {
            count += 1;
            power *= p as u64;
        }
    }

    count
}
