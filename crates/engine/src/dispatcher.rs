// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job dispatch: one submission record per pending branch.

use std::path::Path;

use serde::Serialize;
use sf_adapters::{ClusterId, SchedulerSink};
use sf_core::{BranchData, BranchMap, SchedulerConfig, SubmissionRecord, CLUSTER_PLACEHOLDER};

use crate::command::{condor_arguments, FetchCommand};
use crate::config::WorkflowConfig;
use crate::error::DispatchError;
use crate::expander::{artifact_complete, GateState};

/// What a dispatch pass did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchReport {
    pub gate: GateState,
    pub submitted: Vec<usize>,
    pub skipped: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<u64>,
}

impl DispatchReport {
    /// Report for a pass that found no branches to consider.
    pub fn pending() -> Self {
        Self { gate: GateState::Pending, submitted: Vec::new(), skipped: Vec::new(), cluster: None }
    }
}

pub struct JobDispatcher {
    config: WorkflowConfig,
    command: FetchCommand,
}

impl JobDispatcher {
    pub fn new(config: WorkflowConfig, command: FetchCommand) -> Self {
        Self { config, command }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Submission record for one branch.
    ///
    /// Log, output and error paths are shared by every job in a cluster.
    pub fn record(&self, branch: &BranchData) -> SubmissionRecord {
        let stream = |ext: &str| {
            self.config
                .working_directory
                .join(format!("{}-{}.{}", self.config.name, CLUSTER_PLACEHOLDER, ext))
                .display()
                .to_string()
        };
        SubmissionRecord::new(branch.index)
            .line("executable", self.command.executable())
            .line("arguments", condor_arguments(&self.command.arguments(branch)))
            .line("getenv", "true")
            .line("request_memory", self.config.memory_request.to_string())
            .line("request_disk", self.config.disk_request.to_string())
            .line("accounting_group", self.config.accounting_group.as_str())
            .line("accounting_group_user", self.config.accounting_user.as_str())
            .line("log", stream("log"))
            .line("output", stream("out"))
            .line("error", stream("err"))
    }

    /// Submit description for `branches`, in the order given.
    pub fn build<'a>(&self, branches: impl IntoIterator<Item = &'a BranchData>) -> SchedulerConfig {
        let mut submit = SchedulerConfig::new(self.config.name.as_str());
        for branch in branches {
            submit.append(self.record(branch));
        }
        submit
    }

    /// Submit every branch in `map` whose artifact under `data_dir` is not
    /// complete. Nothing is submitted when every branch is done.
    pub async fn dispatch<K: SchedulerSink>(
        &self,
        sink: &K,
        map: &BranchMap,
        data_dir: &Path,
        ext: &str,
    ) -> Result<DispatchReport, DispatchError> {
        let (done, pending): (Vec<&BranchData>, Vec<&BranchData>) =
            map.iter().partition(|b| artifact_complete(&b.artifact_path(data_dir, ext)));

        let mut report = DispatchReport {
            gate: GateState::Expanded,
            submitted: pending.iter().map(|b| b.index).collect(),
            skipped: done.iter().map(|b| b.index).collect(),
            cluster: None,
        };
        if pending.is_empty() {
            tracing::info!(branches = map.len(), "all branches complete, nothing to submit");
            return Ok(report);
        }

        let submit = self.build(pending);
        let ClusterId(cluster) = sink.submit(&submit).await?;
        tracing::info!(
            cluster,
            submitted = report.submitted.len(),
            skipped = report.skipped.len(),
            "submitted fetch jobs"
        );
        report.cluster = Some(cluster);
        Ok(report)
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
