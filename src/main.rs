// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use psiscan::{
    parse_bound, BitSieve, ChebyshevScanner, FrontierCapacity, PrimePowerFrontier, ReferenceBand,
    ScanConfig, ScanError, ScanReport,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::*;
use cli::{Cli, Commands, ScanArgs};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Scan(args)) => run_scan(args),
        Some(Commands::Frontier { max_n, show }) => run_frontier(&max_n, show),
        None => run_scan(ScanArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Logs go to stderr so stdout stays clean for the report.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read the bound from stdin when `-n` is not given.
fn prompt_bound() -> Result<u64, ScanError> {
    print!("Enter the maximum value of n: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    parse_bound(&line)
}

/// File config first, then flags on top.
fn resolve_config(args: &ScanArgs) -> Result<ScanConfig, ScanError> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::from_json_file(path)?,
        None => ScanConfig::default(),
    };

    if args.lower.is_some() || args.upper.is_some() {
        let lower = args.lower.unwrap_or(config.band.lower());
        let upper = args.upper.unwrap_or(config.band.upper());
        config = config.with_band(ReferenceBand::new(lower, upper)?);
    }

    if args.unbounded {
        config = config.with_frontier_capacity(FrontierCapacity::Unbounded);
    } else if let Some(cap) = args.frontier_capacity {
        config = config.with_frontier_capacity(FrontierCapacity::Bounded(cap));
    }

    Ok(config)
}

fn run_scan(args: ScanArgs) -> Result<(), ScanError> {
    let max_n = match &args.max_n {
        Some(text) => parse_bound(text)?,
        None => prompt_bound()?,
    };
    let config = resolve_config(&args)?;

    let start = Instant::now();
    let scanner = ChebyshevScanner::new(max_n, config)?;
    let sieve_bytes = (max_n >> 3) + 1;
    let show_progress = !args.json && !args.no_progress && atty::is(atty::Stream::Stderr);
    let report = drive(scanner, show_progress)?;
    let elapsed = start.elapsed().as_secs_f64();

    if args.json {
        let json = serde_json::json!({
            "report": report,
            "elapsed_secs": elapsed,
        });
        println!("{}", json);
    } else {
        print_report(&report, config.frontier_capacity, sieve_bytes, elapsed);
    }
    Ok(())
}

#[cfg(feature = "progress")]
fn drive(mut scanner: ChebyshevScanner, show_progress: bool) -> Result<ScanReport, ScanError> {
    use indicatif::{ProgressBar, ProgressStyle};

    // Below this the scan finishes before a bar is worth drawing
    const MIN_PROGRESS_N: u64 = 1 << 22;
    const TICK: u64 = 1 << 16;

    if !show_progress || scanner.max_n() < MIN_PROGRESS_N {
        return scanner.run();
    }

    let pb = ProgressBar::new(scanner.remaining());
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<8} [{bar:40.cyan/dim}] {percent:>3}% {eta} {msg}",
    ) {
        pb.set_style(style.progress_chars("━━╸"));
    }
    pb.set_prefix("Scanning");

    let mut pending = 0;
    for step in scanner.by_ref() {
        if let Err(e) = step {
            pb.abandon();
            return Err(e);
        }
        pending += 1;
        if pending == TICK {
            pb.inc(pending);
            pending = 0;
        }
    }
    pb.finish_and_clear();
    Ok(scanner.report())
}

#[cfg(not(feature = "progress"))]
fn drive(scanner: ChebyshevScanner, _show_progress: bool) -> Result<ScanReport, ScanError> {
    scanner.run()
}

fn print_report(report: &ScanReport, capacity: FrontierCapacity, sieve_bytes: u64, elapsed: f64) {
    section_top("ψ SCAN");
    field("max n", &format_count(report.max_n));
    field(
        "band",
        &format!("({}, {})", report.band_lower, report.band_upper),
    );
    field("sieve", &format_size(sieve_bytes));
    section_mid("RESULT");
    field("ψ(max n)", &themed(BRIGHT_CYAN, &[BOLD], &format!("{:.6}", report.psi)));
    if report.max_n > 0 {
        let ratio = report.psi / report.max_n as f64;
        field("exp(ψ/n)", &format!("{:.9}", ratio.exp()));
    }
    field("last departure", &departure_label(report.last_departure));
    field("departures", &format_count(report.departures));
    section_mid("COUNTS");
    field("primes", &format_count(report.primes));
    field("prime powers", &format_count(report.prime_powers));
    field("frontier peak", &fill_level(report.frontier_peak, capacity.limit()));
    section_mid("TIME");
    field("elapsed", &timing_secs(elapsed));
    section_bot();
}

/// Register every prime's powers up to `max_n` and show the queue.
fn run_frontier(max_n: &str, show: usize) -> Result<(), ScanError> {
    let max_n = parse_bound(max_n)?;

    // Only primes up to √max_n have a square in range
    let mut root = (max_n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > max_n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= max_n) {
        root += 1;
    }

    let sieve = BitSieve::new(root)?;
    let mut frontier = PrimePowerFrontier::with_capacity(FrontierCapacity::Unbounded);
    for p in sieve.primes() {
        frontier.insert_prime_powers(p, max_n)?;
    }
    let bases = sieve.count_primes();
    drop(sieve);

    let live = frontier.live();
    section_top("PRIME POWER FRONTIER");
    field("max n", &format_count(max_n));
    field("primes ≤ √max n", &format_count(bases));
    field("entries", &fill_level(live.len(), FrontierCapacity::default().limit()));
    section_mid("ENTRIES");

    let limit = if show == 0 { live.len() } else { show.min(live.len()) };
    for entry in &live[..limit] {
        row(&format!(
            " {:>14}  {}",
            format_count(entry.value),
            themed(GRAY, &[], &format!("ln p = {:.6}", entry.log_weight))
        ));
    }
    if limit < live.len() {
        row(&themed(
            GRAY,
            &[DIM],
            &format!(" … {} more", format_count((live.len() - limit) as u64)),
        ));
    }
    section_bot();
    Ok(())
}
