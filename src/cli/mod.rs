// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the psiscan command-line interface.
//!
//! Two subcommands: `scan` runs the ψ probe up to a bound, `frontier` shows
//! which prime powers the frontier would queue for a bound and how big it
//! gets. With no subcommand psiscan behaves like `scan` and prompts for the
//! bound on stdin.

pub mod display;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "psiscan",
    about = "Track exp(ψ(n)/n) against a band around e",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan n = 2..=max_n and report the last departure from the band
    Scan(ScanArgs),

    /// Show the prime powers queued for a bound
    Frontier {
        /// Upper bound for the prime powers
        #[arg(short = 'n', long)]
        max_n: String,

        /// How many entries to print (0 prints all)
        #[arg(long, default_value = "40")]
        show: usize,
    },
}

#[derive(Args, Default)]
pub struct ScanArgs {
    /// Upper bound of the scan. Prompted for on stdin when omitted.
    #[arg(short = 'n', long)]
    pub max_n: Option<String>,

    /// JSON config file (band, frontier_capacity)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Lower edge of the band (exclusive)
    #[arg(long)]
    pub lower: Option<f64>,

    /// Upper edge of the band (exclusive)
    #[arg(long)]
    pub upper: Option<f64>,

    /// Maximum live entries in the prime power frontier
    #[arg(long, conflicts_with = "unbounded")]
    pub frontier_capacity: Option<usize>,

    /// Let the frontier grow without limit
    #[arg(long)]
    pub unbounded: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
