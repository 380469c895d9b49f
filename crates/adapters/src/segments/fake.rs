// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sf_core::{Flag, IntervalSet, TimeRange};

use super::{Authenticator, FlagSegments, SegmentQuery, SegmentSource, SourceError};

#[derive(Default)]
struct FakeSourceState {
    flags: FlagSegments,
    script: VecDeque<Result<FlagSegments, SourceError>>,
    calls: Vec<SegmentQuery>,
}

/// Fake segment source for testing.
///
/// Scripted responses are consumed first, in order; afterwards each query is
/// answered from the configured per-flag activity.
#[derive(Clone, Default)]
pub struct FakeSegmentSource {
    inner: Arc<Mutex<FakeSourceState>>,
}

impl FakeSegmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag's activity from `(start, end)` pairs.
    pub fn set_flag(&self, flag: &str, pairs: &[(f64, f64)]) {
        let ranges = pairs.iter().filter_map(|&(s, e)| TimeRange::new(s, e).ok());
        self.inner.lock().flags.insert(Flag::from(flag), IntervalSet::coalesce(ranges));
    }

    pub fn push_error(&self, error: SourceError) {
        self.inner.lock().script.push_back(Err(error));
    }

    pub fn push_response(&self, segments: FlagSegments) {
        self.inner.lock().script.push_back(Ok(segments));
    }

    /// All queries received so far.
    pub fn calls(&self) -> Vec<SegmentQuery> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl SegmentSource for FakeSegmentSource {
    async fn query(&self, query: &SegmentQuery) -> Result<FlagSegments, SourceError> {
        let mut state = self.inner.lock();
        state.calls.push(query.clone());
        if let Some(scripted) = state.script.pop_front() {
            return scripted;
        }
        Ok(query
            .flags
            .iter()
            .filter_map(|f| state.flags.get(f).map(|set| (f.clone(), set.clone())))
            .collect())
    }
}

/// Fake authenticator that counts calls and optionally fails.
#[derive(Clone, Default)]
pub struct FakeAuthenticator {
    inner: Arc<Mutex<(usize, Option<SourceError>)>>,
}

impl FakeAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: SourceError) -> Self {
        Self { inner: Arc::new(Mutex::new((0, Some(error)))) }
    }

    pub fn calls(&self) -> usize {
        self.inner.lock().0
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn authenticate(&self) -> Result<(), SourceError> {
        let mut state = self.inner.lock();
        state.0 += 1;
        match &state.1 {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
