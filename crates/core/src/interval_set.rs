// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered, non-overlapping sequences of time ranges.
//!
//! The ordering invariant (`ranges[i].end <= ranges[i + 1].start`) is checked
//! whenever a set is built from caller-supplied ranges. Adjacent ranges are
//! allowed so that chunked output can be represented without re-merging.

use serde::{Deserialize, Serialize};

use crate::range::{IntervalError, TimeRange};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimeRange>", into = "Vec<TimeRange>")]
pub struct IntervalSet {
    ranges: Vec<TimeRange>,
}

impl TryFrom<Vec<TimeRange>> for IntervalSet {
    type Error = IntervalError;

    fn try_from(ranges: Vec<TimeRange>) -> Result<Self, Self::Error> {
        IntervalSet::from_sorted(ranges)
    }
}

impl From<IntervalSet> for Vec<TimeRange> {
    fn from(set: IntervalSet) -> Self {
        set.ranges
    }
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from ranges that must already be sorted and disjoint.
    pub fn from_sorted(ranges: Vec<TimeRange>) -> Result<Self, IntervalError> {
        for (index, pair) in ranges.windows(2).enumerate() {
            if pair[1].start() < pair[0].end() {
                return Err(IntervalError::Unordered {
                    index: index + 1,
                    start: pair[1].start(),
                    prev_end: pair[0].end(),
                });
            }
        }
        Ok(Self { ranges })
    }

    /// Build a set from arbitrary ranges, sorting and coalescing any that
    /// overlap or touch.
    pub fn coalesce(ranges: impl IntoIterator<Item = TimeRange>) -> Self {
        let mut sorted: Vec<TimeRange> = ranges.into_iter().collect();
        sorted.sort_by(|a, b| a.start().total_cmp(&b.start()));

        let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                Some(last) if range.start() <= last.end() => {
                    if range.end() > last.end() {
                        // Both bounds come from valid ranges, so start < end holds.
                        if let Ok(joined) = TimeRange::new(last.start(), range.end()) {
                            *last = joined;
                        }
                    }
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total time covered by the set.
    pub fn total_duration(&self) -> f64 {
        self.ranges.iter().map(TimeRange::duration).sum()
    }

    /// Time points present in both sets (interval-algebra AND).
    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let a = &self.ranges[i];
            let b = &other.ranges[j];
            if let Some(overlap) = a.intersect(b) {
                out.push(overlap);
            }
            if a.end() <= b.end() {
                i += 1;
            } else {
                j += 1;
            }
        }
        IntervalSet { ranges: out }
    }

    /// Intersection of every set yielded. An empty iterator yields an empty set.
    pub fn intersect_all<'a>(sets: impl IntoIterator<Item = &'a IntervalSet>) -> IntervalSet {
        let mut sets = sets.into_iter();
        let Some(first) = sets.next() else {
            return IntervalSet::new();
        };
        sets.fold(first.clone(), |acc, set| acc.intersection(set))
    }

    /// Restrict the set to the given window.
    pub fn clip(&self, window: &TimeRange) -> IntervalSet {
        IntervalSet { ranges: self.ranges.iter().filter_map(|r| r.intersect(window)).collect() }
    }

    /// Drop (not clip) ranges shorter than `min_duration`.
    pub fn filter_min_duration(&self, min_duration: f64) -> IntervalSet {
        IntervalSet {
            ranges: self.ranges.iter().filter(|r| r.duration() >= min_duration).copied().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a TimeRange;
    type IntoIter = std::slice::Iter<'a, TimeRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

#[cfg(test)]
#[path = "interval_set_tests.rs"]
mod tests;
