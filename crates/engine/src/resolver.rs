// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Segment resolution: merge flags, drop short segments, chunk, number.

use std::io::Write;
use std::path::Path;

use sf_adapters::{Authenticator, SegmentSource};
use sf_core::{chunk_count, split, ChunkTable, Flag, TimeRange};

use crate::error::ResolveError;
use crate::merger::IntervalMerger;

/// Default maximum chunk length in seconds.
pub const DEFAULT_CHUNK_SIZE: f64 = 20_000.0;

/// Smallest accepted chunk length in seconds.
pub const MIN_CHUNK_SIZE: f64 = 1e-3;

/// Upper bound on the rows a single resolution may produce.
pub const MAX_CHUNKS: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    range: TimeRange,
    flags: Vec<Flag>,
    min_duration: Option<f64>,
    chunk_size: Option<f64>,
}

impl ResolveRequest {
    pub fn new(range: TimeRange) -> Self {
        Self { range, flags: Vec::new(), min_duration: None, chunk_size: None }
    }

    sf_core::setters! {
        set {
            flags: Vec<Flag>,
        }
        option {
            min_duration: f64,
            chunk_size: f64,
        }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn flag_list(&self) -> &[Flag] {
        &self.flags
    }

    fn validate(&self) -> Result<(), ResolveError> {
        if let Some(min) = self.min_duration {
            if min.is_nan() || min < 0.0 {
                return Err(ResolveError::InvalidRequest(format!("min_duration must be >= 0, got {}", min)));
            }
        }
        if let Some(chunk) = self.chunk_size {
            if !chunk.is_finite() || chunk < MIN_CHUNK_SIZE {
                return Err(ResolveError::InvalidRequest(format!(
                    "chunk_size must be >= {}, got {}",
                    MIN_CHUNK_SIZE, chunk
                )));
            }
        }
        Ok(())
    }
}

/// Whether [`SegmentResolver::resolve_to_file`] queried or reused a table.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Resolved(ChunkTable),
    Existing(ChunkTable),
}

impl ResolveOutcome {
    pub fn table(&self) -> &ChunkTable {
        match self {
            ResolveOutcome::Resolved(t) | ResolveOutcome::Existing(t) => t,
        }
    }
}

pub struct SegmentResolver<S, A> {
    merger: IntervalMerger<S, A>,
}

impl<S: SegmentSource, A: Authenticator> SegmentResolver<S, A> {
    pub fn new(merger: IntervalMerger<S, A>) -> Self {
        Self { merger }
    }

    /// Resolve the chunk table for `request`.
    ///
    /// Deterministic for a given source response.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ChunkTable, ResolveError> {
        request.validate()?;

        let mut segments = self.merger.active(request.range, &request.flags).await?;
        if let Some(min) = request.min_duration {
            let before = segments.len();
            segments = segments.filter_min_duration(min);
            tracing::debug!(min_duration = min, dropped = before - segments.len(), "filtered short segments");
        }
        if let Some(chunk_size) = request.chunk_size {
            let pieces = chunk_count(&segments, chunk_size);
            if pieces > MAX_CHUNKS {
                return Err(ResolveError::InvalidRequest(format!(
                    "chunk_size {} would produce {} chunks, limit is {}",
                    chunk_size, pieces, MAX_CHUNKS
                )));
            }
            segments = split(&segments, chunk_size);
        }

        let table = ChunkTable::from_intervals(&segments);
        tracing::info!(
            range = %request.range,
            chunks = table.len(),
            livetime = table.total_duration(),
            "resolved segments"
        );
        Ok(table)
    }

    /// Resolve and persist to `path`, unless a readable table is already there.
    pub async fn resolve_to_file(
        &self,
        request: &ResolveRequest,
        path: &Path,
    ) -> Result<ResolveOutcome, ResolveError> {
        if let Ok(text) = std::fs::read_to_string(path) {
            match ChunkTable::parse(&text) {
                Ok(table) => {
                    tracing::info!(path = %path.display(), chunks = table.len(), "segment table already present");
                    return Ok(ResolveOutcome::Existing(table));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "replacing unreadable segment table");
                }
            }
        }
        let table = self.resolve(request).await?;
        persist(&table, path)?;
        Ok(ResolveOutcome::Resolved(table))
    }
}

/// Write `table` to `path` atomically: a sibling temp file is written,
/// synced, then renamed into place.
pub fn persist(table: &ChunkTable, path: &Path) -> Result<(), ResolveError> {
    let err = |source| ResolveError::Persist { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(err)?;

    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let tmp = dir.join(format!(".{}.tmp", file_name));
    let write = || -> std::io::Result<()> {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(table.to_tsv().as_bytes())?;
        file.sync_all()?;
        std::fs::rename(&tmp, path)
    };
    if let Err(e) = write() {
        let _ = std::fs::remove_file(&tmp);
        return Err(err(e));
    }
    tracing::debug!(path = %path.display(), rows = table.len(), "persisted segment table");
    Ok(())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
