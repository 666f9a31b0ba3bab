// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Streaming Chebyshev ψ scanner.
//!
//! Computes ψ(n) = Σ_{p^k ≤ n} ln p for every n up to a bound and reports the
//! last n where exp(ψ(n)/n) sits outside a reference band around e. The Prime
//! Number Theorem says ψ(n)/n → 1; this probes how late the ratio still
//! wanders.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐                      ┌──────────────────┐
//! │  sieve.rs   │                      │   frontier.rs    │
//! │ (BitSieve,  │                      │ (PrimePower-     │
//! │  is_prime)  │                      │  Frontier)       │
//! └──────┬──────┘                      └────────┬─────────┘
//!        │ query n                 insert / consume │
//!        ▼                                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    scanner.rs                        │
//! │  (ChebyshevScanner: ψ, ratio, last departure)        │
//! └─────────────────────────────────────────────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  verify/contracts.rs                 │
//! │  (debug-only invariant checks on every step)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use psiscan::{scan, ScanConfig};
//!
//! let report = scan(10, ScanConfig::default()).unwrap();
//! assert_eq!(report.last_departure, Some(10));
//! assert!((report.psi - 7.832015).abs() < 1e-6);
//! ```

pub mod config;
pub mod error;
pub mod frontier;
pub mod scanner;
pub mod sieve;
pub mod testing;
pub mod verify;

pub use config::{
    parse_bound, FrontierCapacity, ReferenceBand, ScanConfig, DEFAULT_BAND_LOWER,
    DEFAULT_BAND_UPPER, DEFAULT_FRONTIER_CAPACITY,
};
pub use error::ScanError;
pub use frontier::{PrimePowerEntry, PrimePowerFrontier};
pub use scanner::{scan, ChebyshevScanner, RunningState, ScanReport, ScanStep, StepKind};
pub use sieve::BitSieve;
