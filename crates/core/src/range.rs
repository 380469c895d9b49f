// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Half-open time intervals, in seconds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when interval invariants are violated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntervalError {
    #[error("interval bounds must be finite, got [{start}, {end})")]
    NotFinite { start: f64, end: f64 },

    #[error("interval start must precede end, got [{start}, {end})")]
    Empty { start: f64, end: f64 },

    #[error("interval {index} starts at {start} before previous interval ends at {prev_end}")]
    Unordered { index: usize, start: f64, prev_end: f64 },
}

/// A half-open span of time `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct TimeRange {
    start: f64,
    end: f64,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    start: f64,
    end: f64,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = IntervalError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl From<TimeRange> for RawRange {
    fn from(range: TimeRange) -> Self {
        RawRange { start: range.start, end: range.end }
    }
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Result<Self, IntervalError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(IntervalError::NotFinite { start, end });
        }
        if start >= end {
            return Err(IntervalError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from a start and a positive duration.
    pub fn with_duration(start: f64, duration: f64) -> Result<Self, IntervalError> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Overlap of two ranges, or `None` if they share no time.
    ///
    /// Ranges that merely touch (`a.end == b.start`) do not overlap.
    pub fn intersect(&self, other: &TimeRange) -> Option<TimeRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(TimeRange { start, end })
    }

    /// True if `other` lies entirely within this range.
    pub fn covers(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
