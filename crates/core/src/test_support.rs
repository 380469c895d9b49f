// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::branch::BranchData;
use crate::interval_set::IntervalSet;
use crate::range::TimeRange;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for interval types.
pub mod strategies {
    use crate::interval_set::IntervalSet;
    use crate::range::TimeRange;
    use proptest::prelude::*;

    /// Sorted, disjoint sets with whole-second bounds in `[0, ~10_000)`.
    pub fn arb_interval_set() -> impl Strategy<Value = IntervalSet> {
        prop::collection::vec((0u32..100, 1u32..400), 0..12).prop_map(|steps| {
            let mut cursor = 0u32;
            let mut ranges = Vec::with_capacity(steps.len());
            for (gap, width) in steps {
                let start = cursor + gap;
                let end = start + width;
                if let Ok(range) = TimeRange::new(f64::from(start), f64::from(end)) {
                    ranges.push(range);
                }
                cursor = end;
            }
            IntervalSet::from_sorted(ranges).unwrap_or_default()
        })
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

/// Build an interval set from `(start, end)` pairs.
///
/// Panics on invalid input; for tests only.
#[allow(clippy::expect_used)]
pub fn intervals(pairs: &[(f64, f64)]) -> IntervalSet {
    let ranges = pairs
        .iter()
        .map(|&(start, end)| TimeRange::new(start, end).expect("valid test range"))
        .collect();
    IntervalSet::from_sorted(ranges).expect("sorted test ranges")
}

/// A branch with the default `deepclean` prefix and a single channel.
pub fn branch(index: usize, start: f64, duration: f64) -> BranchData {
    BranchData {
        index,
        start,
        duration,
        channels: vec!["H1:GDS-CALIB_STRAIN".to_string()],
        sample_rate: 4096.0,
        prefix: "deepclean".to_string(),
    }
}
