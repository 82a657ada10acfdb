// ABOUTME: Activity analysis: report aggregation and goal progress recomputation
// ABOUTME: Pure computation over fetched rows, independent of HTTP and storage layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Analysis layer.
//!
//! Everything in here is a pure function over data the caller already
//! fetched; the route handlers own the queries, this module owns the
//! arithmetic.

/// Goal progress computation and status derivation
pub mod progress;
/// Analytics report aggregation over workout and goal sets
pub mod reports;

pub use progress::{derive_status, recompute, ActivitySummary};
pub use reports::{build_report, resolve_window, trend};
