// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted chunk table.
//!
//! Segwizard-style tab-separated text:
//!
//! ```text
//! # seg	start	stop	duration
//! 0	10	40	30
//! 1	40	70	30
//! 2	70	90	20
//! ```
//!
//! The `seg` column is zero-based on disk; in memory each row carries the
//! dense 1-based branch index.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval_set::IntervalSet;
use crate::range::TimeRange;

/// Header line written at the top of every table.
pub const HEADER: &str = "# seg\tstart\tstop\tduration";

/// Minimum number of tab-separated fields per row.
const MIN_FIELDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkTableError {
    #[error("malformed chunk table at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// One work unit: `[start, start + duration)` keyed by a 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkRow {
    pub index: usize,
    pub start: f64,
    pub duration: f64,
}

impl ChunkRow {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkTable {
    rows: Vec<ChunkRow>,
}

impl ChunkTable {
    /// Number the ranges of `intervals` 1..=n in start-time order.
    pub fn from_intervals(intervals: &IntervalSet) -> Self {
        let rows = intervals
            .iter()
            .enumerate()
            .map(|(i, r)| ChunkRow { index: i + 1, start: r.start(), duration: r.duration() })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ChunkRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChunkRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.rows.iter().map(|r| r.duration).sum()
    }

    /// Render the on-disk text form.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                row.index.saturating_sub(1),
                row.start,
                row.end(),
                row.duration
            ));
        }
        out
    }

    /// Parse the on-disk text form. The first line is always skipped.
    ///
    /// Only the `seg`, `start` and `duration` columns are read; the `stop`
    /// column between them is stepped over.
    pub fn parse(text: &str) -> Result<Self, ChunkTableError> {
        let mut rows = Vec::new();
        let mut seen = BTreeSet::new();
        for (offset, raw) in text.lines().enumerate().skip(1) {
            let line = offset + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = raw.split('\t').map(str::trim).collect();
            if fields.len() < MIN_FIELDS {
                return Err(ChunkTableError::Malformed {
                    line,
                    reason: format!("expected {} fields, found {}", MIN_FIELDS, fields.len()),
                });
            }
            let seg = parse_seg(fields[0], line)?;
            // fields[1..] alternate start, stop, duration: take every second one.
            let mut values = fields[1..].iter().step_by(2);
            let start = parse_number(values.next().copied(), "start", line)?;
            let duration = parse_number(values.next().copied(), "duration", line)?;
            TimeRange::with_duration(start, duration)
                .map_err(|e| ChunkTableError::Malformed { line, reason: e.to_string() })?;
            let index = seg + 1;
            if !seen.insert(index) {
                return Err(ChunkTableError::Malformed {
                    line,
                    reason: format!("duplicate segment {}", seg),
                });
            }
            rows.push(ChunkRow { index, start, duration });
        }
        Ok(Self { rows })
    }
}

fn parse_seg(field: &str, line: usize) -> Result<usize, ChunkTableError> {
    field.parse::<usize>().map_err(|_| ChunkTableError::Malformed {
        line,
        reason: format!("invalid segment number {:?}", field),
    })
}

fn parse_number(field: Option<&str>, name: &str, line: usize) -> Result<f64, ChunkTableError> {
    let field = field.unwrap_or_default();
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ChunkTableError::Malformed { line, reason: format!("invalid {} {:?}", name, field) }),
    }
}

#[cfg(test)]
#[path = "chunk_table_tests.rs"]
mod tests;
