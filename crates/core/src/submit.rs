// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler submission records.
//!
//! A [`SchedulerConfig`] is an append-only arena of records, one per branch.
//! Records are built whole and never edited once appended.

use serde::{Deserialize, Serialize};

/// Placeholder the scheduler replaces with the cluster id at submit time.
pub const CLUSTER_PLACEHOLDER: &str = "$(Cluster)";

/// Ordered `key = value` lines for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub branch: usize,
    lines: Vec<(String, String)>,
}

impl SubmissionRecord {
    pub fn new(branch: usize) -> Self {
        Self { branch, lines: Vec::new() }
    }

    pub fn line(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push((key.into(), value.into()));
        self
    }

    /// Last value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn lines(&self) -> &[(String, String)] {
        &self.lines
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    name: String,
    records: Vec<SubmissionRecord>,
}

impl SchedulerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), records: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn append(&mut self, record: SubmissionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render a submit description with one `queue` statement per record.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&format!("# {} branch {}\n", self.name, record.branch));
            for (key, value) in &record.lines {
                out.push_str(&format!("{} = {}\n", key, value));
            }
            out.push_str("queue\n\n");
        }
        out
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
