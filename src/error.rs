// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by the sieve, the frontier, and the scanner.
//!
//! Two kinds of failure matter here. Resource failures (the sieve could not be
//! allocated, the frontier outgrew its capacity) end the run: a partial sieve or
//! a truncated frontier would silently corrupt ψ for every later n. Input
//! failures (a bound that is not a number, a band that is empty) are reported
//! back to whoever supplied the input.
//!
//! There are no retries. The computation is deterministic, so running it again
//! with the same input fails the same way.

use std::fmt;

/// Everything that can go wrong while setting up or running a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanError {
    /// The bit-packed sieve for `limit` could not be allocated.
    SieveAllocation { limit: u64, bytes: u64 },
    /// Registering `value` would push the frontier past `capacity` live entries.
    FrontierOverflow { capacity: usize, value: u64 },
    /// A textual bound could not be turned into a `max_n`.
    InvalidBound { input: String, reason: String },
    /// The reference band is empty, non-finite, or not strictly positive.
    InvalidBand { lower: f64, upper: f64 },
    /// A configuration file could not be read or parsed.
    Config { path: String, message: String },
    /// Reading the bound from the prompt failed.
    Io(String),
}

impl ScanError {
    /// Process exit status for this error.
    ///
    /// Resource exhaustion exits with 1, bad input with 2 (the same status
    /// clap uses for usage errors).
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::SieveAllocation { .. } | ScanError::FrontierOverflow { .. } => 1,
            ScanError::InvalidBound { .. }
            | ScanError::InvalidBand { .. }
            | ScanError::Config { .. }
            | ScanError::Io(_) => 2,
        }
    }

    /// True for the fatal resource conditions that abort a running scan.
    pub fn is_fatal(&self) -> bool {
        self.exit_code() == 1
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::SieveAllocation { limit, bytes } => {
                write!(
                    f,
                    "memory allocation failed for sieve: {} bytes needed for limit {}",
                    bytes, limit
                )
            }
            ScanError::FrontierOverflow { capacity, value } => {
                write!(
                    f,
                    "prime power frontier overflow: {} live entries reached while inserting {}",
                    capacity, value
                )
            }
            ScanError::InvalidBound { input, reason } => {
                write!(f, "invalid bound '{}': {}", input, reason)
            }
            ScanError::InvalidBand { lower, upper } => {
                write!(
                    f,
                    "invalid reference band ({}, {}): need 0 < lower < upper, both finite",
                    lower, upper
                )
            }
            ScanError::Config { path, message } => {
                write!(f, "failed to load config '{}': {}", path, message)
            }
            ScanError::Io(message) => write!(f, "failed to read input: {}", message),
        }
    }
}

impl std::error::Error for ScanError {}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        ScanError::Io(e.to_string())
    }
}
