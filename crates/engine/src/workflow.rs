// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-phase workflow driver.
//!
//! Phase one resolves the segment table and persists it. Phase two expands
//! the table into branches and submits the ones without a finished
//! artifact. Phase two before phase one is not an error: the gate is still
//! pending and nothing is submitted.

use std::path::{Path, PathBuf};

use sf_adapters::{Authenticator, SchedulerSink, SegmentSource};
use sf_core::TimeRange;

use crate::config::SegflowConfig;
use crate::dispatcher::{DispatchReport, JobDispatcher};
use crate::error::{ConfigError, ResolveError, WorkflowError};
use crate::expander::{BranchExpander, GateState};
use crate::merger::IntervalMerger;
use crate::resolver::{ResolveOutcome, ResolveRequest, SegmentResolver};

pub struct Workflow<S, A> {
    resolver: SegmentResolver<S, A>,
    request: ResolveRequest,
    expander: BranchExpander,
    dispatcher: JobDispatcher,
    data_dir: PathBuf,
    artifact_ext: String,
}

impl<S: SegmentSource, A: Authenticator> Workflow<S, A> {
    pub fn new(
        resolver: SegmentResolver<S, A>,
        request: ResolveRequest,
        expander: BranchExpander,
        dispatcher: JobDispatcher,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resolver,
            request,
            expander,
            dispatcher,
            data_dir: data_dir.into(),
            artifact_ext: sf_core::DEFAULT_ARTIFACT_EXT.to_string(),
        }
    }

    pub fn with_artifact_ext(mut self, ext: impl Into<String>) -> Self {
        self.artifact_ext = ext.into();
        self
    }

    /// Wire every phase from a loaded config.
    pub fn from_config(
        config: &SegflowConfig,
        range: TimeRange,
        source: S,
        authenticator: A,
    ) -> Result<Self, ConfigError> {
        config.workflow.validate()?;
        let command = config.fetch.command()?;

        let merger = IntervalMerger::new(source, authenticator).with_params(config.query.params.clone());
        let expander = BranchExpander::new(config.fetch.segments_path(), config.fetch.branch_params());
        let dispatcher = JobDispatcher::new(config.workflow.clone(), command);

        Ok(Self::new(
            SegmentResolver::new(merger),
            config.query.request(range),
            expander,
            dispatcher,
            &config.fetch.data_dir,
        )
        .with_artifact_ext(&config.fetch.artifact_ext))
    }

    pub fn state(&self) -> GateState {
        self.expander.state()
    }

    pub fn expander(&self) -> &BranchExpander {
        &self.expander
    }

    pub fn segments_file(&self) -> &Path {
        self.expander.segments_file()
    }

    /// Phase one: resolve and persist the segment table.
    pub async fn resolve(&self) -> Result<ResolveOutcome, ResolveError> {
        self.resolver.resolve_to_file(&self.request, self.expander.segments_file()).await
    }

    /// Phase two: expand and submit pending branches.
    pub async fn submit<K: SchedulerSink>(&self, sink: &K) -> Result<DispatchReport, WorkflowError> {
        if self.expander.poll()? == GateState::Pending {
            tracing::info!(path = %self.segments_file().display(), "segment table not written yet, nothing to submit");
            return Ok(DispatchReport::pending());
        }
        let map = self.expander.branch_map()?;
        for branch in map.iter() {
            tracing::debug!(index = branch.index, start = branch.start, duration = branch.duration, "branch");
        }
        Ok(self.dispatcher.dispatch(sink, &map, &self.data_dir, &self.artifact_ext).await?)
    }

    /// Both phases in order.
    pub async fn run<K: SchedulerSink>(&self, sink: &K) -> Result<DispatchReport, WorkflowError> {
        self.resolve().await?;
        self.submit(sink).await
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
