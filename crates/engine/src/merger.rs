// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval merging across data-quality flags.
//!
//! Restricted flags go through one authenticated query; open flags are
//! queried one at a time without credentials. The result is the time during
//! which every flag is active, clipped to the requested range.

use std::collections::BTreeMap;

use sf_adapters::{Authenticator, FlagSegments, SegmentQuery, SegmentSource, SourceError};
use sf_core::{Flag, FlagRegistry, IntervalSet, TimeRange};

use crate::error::ResolveError;

pub struct IntervalMerger<S, A> {
    source: S,
    authenticator: A,
    registry: FlagRegistry,
    params: BTreeMap<String, String>,
}

impl<S: SegmentSource, A: Authenticator> IntervalMerger<S, A> {
    pub fn new(source: S, authenticator: A) -> Self {
        Self { source, authenticator, registry: FlagRegistry::default(), params: BTreeMap::new() }
    }

    pub fn with_registry(mut self, registry: FlagRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Keyword parameters forwarded to every source query.
    pub fn with_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Time within `range` during which every flag in `flags` is active.
    ///
    /// No flags means no valid time: the result is empty, not an error.
    pub async fn active(&self, range: TimeRange, flags: &[Flag]) -> Result<IntervalSet, ResolveError> {
        let parts = self.registry.partition(flags);
        if parts.is_empty() {
            tracing::debug!(%range, "no flags requested, nothing is active");
            return Ok(IntervalSet::new());
        }

        let mut per_flag: Vec<IntervalSet> = Vec::with_capacity(parts.len());

        if !parts.restricted.is_empty() {
            let found = self.query_restricted(range, &parts.restricted).await?;
            collect_flags(&parts.restricted, found, &range, &mut per_flag);
        }

        for flag in &parts.open {
            let query = self.query(range, std::slice::from_ref(flag), false);
            let found = self.source.query(&query).await.map_err(ResolveError::Query)?;
            collect_flags(std::slice::from_ref(flag), found, &range, &mut per_flag);
        }

        let active = IntervalSet::intersect_all(&per_flag);
        tracing::info!(
            %range,
            restricted = parts.restricted.len(),
            open = parts.open.len(),
            segments = active.len(),
            livetime = active.total_duration(),
            "merged flag segments"
        );
        Ok(active)
    }

    /// Authenticated query with a single re-authenticate-and-retry on a
    /// credential failure.
    async fn query_restricted(
        &self,
        range: TimeRange,
        flags: &[Flag],
    ) -> Result<FlagSegments, ResolveError> {
        let query = self.query(range, flags, true);
        match self.source.query(&query).await {
            Ok(found) => Ok(found),
            Err(err) if err.is_auth() => {
                tracing::warn!(error = %err, "restricted query rejected credentials, re-authenticating");
                self.authenticator.authenticate().await.map_err(ResolveError::Auth)?;
                self.source.query(&query).await.map_err(|err| match err {
                    SourceError::Auth(_) => ResolveError::Auth(err),
                    other => ResolveError::Query(other),
                })
            }
            Err(err) => Err(ResolveError::Query(err)),
        }
    }

    fn query(&self, range: TimeRange, flags: &[Flag], authenticated: bool) -> SegmentQuery {
        SegmentQuery { flags: flags.to_vec(), range, authenticated, params: self.params.clone() }
    }
}

/// Push each requested flag's clipped activity. A flag missing from the
/// response was never active.
fn collect_flags(flags: &[Flag], mut found: FlagSegments, range: &TimeRange, out: &mut Vec<IntervalSet>) {
    for flag in flags {
        let set = found.remove(flag).unwrap_or_default();
        out.push(set.clip(range));
    }
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
