// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Branch parameters derived from a chunk table.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default artifact extension for fetched data.
pub const DEFAULT_ARTIFACT_EXT: &str = "hdf5";

/// Parameters for one fetch job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchData {
    pub index: usize,
    pub start: f64,
    pub duration: f64,
    pub channels: Vec<String>,
    pub sample_rate: f64,
    pub prefix: String,
}

impl BranchData {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// `{prefix}-{floor(start)}-{floor(duration)}.{ext}`
    pub fn artifact_name(&self, ext: &str) -> String {
        artifact_name(&self.prefix, self.start, self.duration, ext)
    }

    pub fn artifact_path(&self, data_dir: &Path, ext: &str) -> PathBuf {
        data_dir.join(self.artifact_name(ext))
    }
}

/// File name of the artifact a branch covering `[start, start + duration)` produces.
pub fn artifact_name(prefix: &str, start: f64, duration: f64, ext: &str) -> String {
    format!("{}-{}-{}.{}", prefix, start.floor() as i64, duration.floor() as i64, ext)
}

/// Branch index -> parameters, iterated in index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchMap {
    branches: BTreeMap<usize, BranchData>,
}

impl BranchMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, data: BranchData) -> Option<BranchData> {
        self.branches.insert(data.index, data)
    }

    pub fn get(&self, index: usize) -> Option<&BranchData> {
        self.branches.get(&index)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.branches.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BranchData> {
        self.branches.values()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl FromIterator<BranchData> for BranchMap {
    fn from_iter<I: IntoIterator<Item = BranchData>>(iter: I) -> Self {
        let mut map = BranchMap::new();
        for data in iter {
            map.insert(data);
        }
        map
    }
}

#[cfg(test)]
#[path = "branch_tests.rs"]
mod tests;
