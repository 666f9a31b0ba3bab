// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: runtime contracts for the sieve, the frontier, and
//! the scan.
//!
//! The contracts panic in debug builds when an invariant is violated and
//! compile to nothing in release. They catch algorithmic errors while tests
//! run; the release scan loop pays nothing for them.

pub mod contracts;
