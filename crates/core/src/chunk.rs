// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitting long intervals into bounded work units.

use crate::interval_set::IntervalSet;
use crate::range::TimeRange;

/// Split every range longer than `chunk_size` into consecutive pieces of at
/// most `chunk_size` seconds. The last piece of each range ends exactly at
/// the range's end, so coverage is preserved and no overlap is introduced.
///
/// Ranges already within the bound pass through unchanged, which makes the
/// operation idempotent.
pub fn split(intervals: &IntervalSet, chunk_size: f64) -> IntervalSet {
    let mut pieces = Vec::with_capacity(intervals.len());
    for range in intervals {
        let duration = range.duration();
        if duration <= chunk_size {
            pieces.push(*range);
            continue;
        }

        let count = piece_count(duration, chunk_size);
        let (start, stop) = (range.start(), range.end());
        let mut lo = start;
        let mut i = 0;
        while lo < stop {
            i += 1;
            let target = if i >= count { stop } else { (start + i as f64 * chunk_size).min(stop) };
            let hi = clamp_width(lo, target, chunk_size);
            match TimeRange::new(lo, hi) {
                Ok(piece) => pieces.push(piece),
                Err(_) => break,
            }
            lo = hi;
        }
    }
    // Pieces come from sorted, disjoint input and never cross a range's end.
    IntervalSet::from_sorted(pieces).unwrap_or_default()
}

/// Largest end at or below `target` that keeps `[lo, end)` within `width`.
///
/// `lo + width` can round up by an ulp, so step down until the bound holds.
fn clamp_width(lo: f64, target: f64, width: f64) -> f64 {
    let mut hi = target.min(lo + width);
    while hi - lo > width {
        hi = hi.next_down();
    }
    hi
}

/// Total pieces [`split`] makes from `intervals`, without building them.
///
/// Saturates rather than overflowing for absurd ratios.
pub fn chunk_count(intervals: &IntervalSet, chunk_size: f64) -> usize {
    intervals
        .iter()
        .map(|r| if r.duration() <= chunk_size { 1 } else { piece_count(r.duration(), chunk_size) })
        .fold(0, usize::saturating_add)
}

/// Number of pieces for a range of `duration` seconds.
///
/// Durations are treated as counts of whole seconds: `floor((d - 1) / c) + 1`.
/// For fractional durations that formula can fall one short of covering the
/// range, in which case the true ceiling is used instead.
fn piece_count(duration: f64, chunk_size: f64) -> usize {
    let count = ((duration - 1.0) / chunk_size).floor() as usize + 1;
    if count as f64 * chunk_size < duration {
        (duration / chunk_size).ceil() as usize
    } else {
        count
    }
}

#[cfg(test)]
#[path = "chunk_tests.rs"]
mod tests;
