// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamic branch expansion gated on the persisted segment table.
//!
//! While the table is absent the gate is [`GateState::Pending`] and the
//! branch map is empty. The first read that finds the table builds the map
//! once; later reads return the cached map, so branch indices stay stable
//! for the life of the expander even if the file changes underneath it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sf_core::{BranchData, BranchMap, ChunkTable};

use crate::error::ExpandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Segment table not written yet; no branches exist.
    Pending,
    /// Branch map built and cached.
    Expanded,
}

sf_core::simple_display! {
    GateState {
        Pending => "pending",
        Expanded => "expanded",
    }
}

/// Parameters shared by every branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchParams {
    pub channels: Vec<String>,
    pub sample_rate: f64,
    pub prefix: String,
}

pub struct BranchExpander {
    segments_file: PathBuf,
    params: BranchParams,
    map: Mutex<Option<Arc<BranchMap>>>,
}

impl BranchExpander {
    pub fn new(segments_file: impl Into<PathBuf>, params: BranchParams) -> Self {
        Self { segments_file: segments_file.into(), params, map: Mutex::new(None) }
    }

    pub fn segments_file(&self) -> &Path {
        &self.segments_file
    }

    pub fn state(&self) -> GateState {
        if self.map.lock().is_some() {
            GateState::Expanded
        } else {
            GateState::Pending
        }
    }

    /// Re-check the gate, expanding if the segment table has appeared.
    pub fn poll(&self) -> Result<GateState, ExpandError> {
        self.branch_map()?;
        Ok(self.state())
    }

    /// The branch map, or an empty map while pending.
    pub fn branch_map(&self) -> Result<Arc<BranchMap>, ExpandError> {
        let mut cached = self.map.lock();
        if let Some(map) = cached.as_ref() {
            return Ok(Arc::clone(map));
        }

        let text = match std::fs::read_to_string(&self.segments_file) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.segments_file.display(), "segment table pending");
                return Ok(Arc::new(BranchMap::new()));
            }
            Err(source) => {
                return Err(ExpandError::Read { path: self.segments_file.clone(), source });
            }
        };
        let table = ChunkTable::parse(&text)
            .map_err(|source| ExpandError::Malformed { path: self.segments_file.clone(), source })?;

        let map = Arc::new(expand_table(&table, &self.params));
        tracing::info!(
            path = %self.segments_file.display(),
            branches = map.len(),
            "expanded branch map"
        );
        *cached = Some(Arc::clone(&map));
        Ok(map)
    }

    /// Branches whose output artifact is missing or empty.
    ///
    /// Completion is tracked here, separately from map construction: the map
    /// always contains every branch.
    pub fn pending_branches(&self, data_dir: &Path, ext: &str) -> Result<Vec<BranchData>, ExpandError> {
        let map = self.branch_map()?;
        Ok(map.iter().filter(|b| !artifact_complete(&b.artifact_path(data_dir, ext))).cloned().collect())
    }
}

/// Map each chunk row to branch parameters, keyed by the row index.
pub fn expand_table(table: &ChunkTable, params: &BranchParams) -> BranchMap {
    table
        .iter()
        .map(|row| BranchData {
            index: row.index,
            start: row.start,
            duration: row.duration,
            channels: params.channels.clone(),
            sample_rate: params.sample_rate,
            prefix: params.prefix.clone(),
        })
        .collect()
}

/// An artifact counts as complete when it exists as a non-empty file.
pub fn artifact_complete(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file() && m.len() > 0).unwrap_or(false)
}

#[cfg(test)]
#[path = "expander_tests.rs"]
mod tests;
