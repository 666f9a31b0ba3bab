// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scan configuration: the reference band, frontier sizing, and bound parsing.
//!
//! Defaults reproduce the classic probe: is exp(ψ(n)/n) within (2.718, 2.719)?
//! Everything can be overridden from a JSON file, then again from CLI flags.
//!
//! ```json
//! {
//!   "band": { "lower": 2.718, "upper": 2.719 },
//!   "frontier_capacity": { "bounded": 3700 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ScanError;

/// Default lower edge of the band (exclusive).
pub const DEFAULT_BAND_LOWER: f64 = 2.718;

/// Default upper edge of the band (exclusive).
pub const DEFAULT_BAND_UPPER: f64 = 2.719;

/// Live frontier entries allowed by default.
///
/// There are 3689 prime powers p^k (k ≥ 2) up to 10^9, the largest bound the
/// sieve handles in a few hundred megabytes.
pub const DEFAULT_FRONTIER_CAPACITY: usize = 3700;

// ═══════════════════════════════════════════════════════════════════════════
// REFERENCE BAND
// ═══════════════════════════════════════════════════════════════════════════

/// Open interval (lower, upper) that exp(ψ(n)/n) is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand", into = "RawBand")]
pub struct ReferenceBand {
    lower: f64,
    upper: f64,
    ln_lower: f64,
    ln_upper: f64,
}

#[derive(Serialize, Deserialize)]
struct RawBand {
    lower: f64,
    upper: f64,
}

impl ReferenceBand {
    /// Validate and build a band. Both edges must be finite, positive, and ordered.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ScanError> {
        let valid = lower.is_finite() && upper.is_finite() && lower > 0.0 && lower < upper;
        if !valid {
            return Err(ScanError::InvalidBand { lower, upper });
        }

        Ok(Self {
            lower,
            upper,
            ln_lower: lower.ln(),
            ln_upper: upper.ln(),
        })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Is exp(`ratio`) strictly inside the band?
    ///
    /// exp is monotonic, so this compares `ratio` against the precomputed
    /// logarithms of the edges instead of exponentiating once per n.
    #[inline]
    pub fn contains_exp(&self, ratio: f64) -> bool {
        self.ln_lower < ratio && ratio < self.ln_upper
    }
}

impl Default for ReferenceBand {
    fn default() -> Self {
        Self {
            lower: DEFAULT_BAND_LOWER,
            upper: DEFAULT_BAND_UPPER,
            ln_lower: DEFAULT_BAND_LOWER.ln(),
            ln_upper: DEFAULT_BAND_UPPER.ln(),
        }
    }
}

impl TryFrom<RawBand> for ReferenceBand {
    type Error = ScanError;

    fn try_from(raw: RawBand) -> Result<Self, Self::Error> {
        ReferenceBand::new(raw.lower, raw.upper)
    }
}

impl From<ReferenceBand> for RawBand {
    fn from(band: ReferenceBand) -> Self {
        RawBand {
            lower: band.lower,
            upper: band.upper,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// FRONTIER CAPACITY
// ═══════════════════════════════════════════════════════════════════════════

/// How many live entries the prime power frontier may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierCapacity {
    /// Fail with [`ScanError::FrontierOverflow`] beyond this many live entries.
    Bounded(usize),
    /// Grow without limit.
    Unbounded,
}

impl FrontierCapacity {
    /// Does a frontier with `live` entries have room for one more?
    #[inline]
    pub fn admits(&self, live: usize) -> bool {
        match self {
            FrontierCapacity::Bounded(cap) => live < *cap,
            FrontierCapacity::Unbounded => true,
        }
    }

    /// The bound, if any.
    pub fn limit(&self) -> Option<usize> {
        match self {
            FrontierCapacity::Bounded(cap) => Some(*cap),
            FrontierCapacity::Unbounded => None,
        }
    }
}

impl Default for FrontierCapacity {
    fn default() -> Self {
        FrontierCapacity::Bounded(DEFAULT_FRONTIER_CAPACITY)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SCAN CONFIG
// ═══════════════════════════════════════════════════════════════════════════

/// Settings consumed by [`crate::ChebyshevScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub band: ReferenceBand,
    pub frontier_capacity: FrontierCapacity,
}

impl ScanConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScanError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content).map_err(|e| match e {
            ScanError::Config { message, .. } => ScanError::Config {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ScanError> {
        serde_json::from_str(json).map_err(|e| ScanError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_band(mut self, band: ReferenceBand) -> Self {
        self.band = band;
        self
    }

    pub fn with_frontier_capacity(mut self, capacity: FrontierCapacity) -> Self {
        self.frontier_capacity = capacity;
        self
    }
}

/// Parse a user-supplied bound.
///
/// Accepts surrounding whitespace and `_` digit separators (`1_000_000`).
/// Anything else that is not a non-negative integer is rejected.
pub fn parse_bound(input: &str) -> Result<u64, ScanError> {
    let trimmed = input.trim();
    let invalid = |reason: &str| ScanError::InvalidBound {
        input: trimmed.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty input"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid("bound must be non-negative"));
    }

    let digits: String = trimmed.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("not a decimal integer"));
    }

    digits
        .parse::<u64>()
        .map_err(|_| invalid("does not fit in 64 bits"))
}
