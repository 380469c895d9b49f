// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Segment source backed by a JSON document of per-flag segments.
//!
//! ```json
//! { "H1:DCS-ANALYSIS_READY_C01:1": [[1250000000, 1250004096], ...] }
//! ```
//!
//! Used for offline runs and for replaying cached query results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sf_core::{IntervalSet, TimeRange};

use super::{FlagSegments, SegmentQuery, SegmentSource, SourceError};

#[derive(Clone, Debug)]
pub struct JsonSegmentSource {
    path: PathBuf,
    credential: Option<PathBuf>,
}

impl JsonSegmentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), credential: None }
    }

    /// Require `credential` to exist for authenticated queries.
    pub fn with_credential(mut self, credential: impl Into<PathBuf>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_credential(&self) -> Result<(), SourceError> {
        match &self.credential {
            Some(cert) if !cert.exists() => Err(SourceError::from_message(format!(
                "Could not find the TLS certificate file {}",
                cert.display()
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SegmentSource for JsonSegmentSource {
    async fn query(&self, query: &SegmentQuery) -> Result<FlagSegments, SourceError> {
        if query.authenticated {
            self.check_credential()?;
        }

        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::Query(format!("reading {}: {}", self.path.display(), e))
        })?;
        let document: BTreeMap<String, Vec<(f64, f64)>> = serde_json::from_str(&text)
            .map_err(|e| SourceError::Query(format!("parsing {}: {}", self.path.display(), e)))?;

        let mut out = FlagSegments::new();
        for flag in &query.flags {
            let Some(pairs) = document.get(flag.as_str()) else {
                tracing::debug!(%flag, "flag absent from segment document");
                continue;
            };
            // Empty segments carry no livetime; reversed ones are still errors.
            let ranges = pairs
                .iter()
                .filter(|(start, end)| start != end)
                .map(|&(start, end)| TimeRange::new(start, end))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SourceError::Query(format!("flag {}: {}", flag, e)))?;
            out.insert(flag.clone(), IntervalSet::coalesce(ranges));
        }
        tracing::debug!(
            path = %self.path.display(),
            flags = query.flags.len(),
            found = out.len(),
            authenticated = query.authenticated,
            "queried segment document"
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
