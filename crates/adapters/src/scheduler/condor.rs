// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTCondor submission via `condor_submit`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use sf_core::SchedulerConfig;

use super::{ClusterId, SchedulerError, SchedulerSink};
use crate::subprocess::{run_with_timeout, SUBMIT_TIMEOUT};

/// Writes `{submit_dir}/{name}.sub` and hands it to `condor_submit`.
#[derive(Clone, Debug)]
pub struct CondorSubmitSink {
    submit_dir: PathBuf,
    program: String,
    program_args: Vec<String>,
    timeout: Duration,
}

impl CondorSubmitSink {
    pub fn new(submit_dir: impl Into<PathBuf>) -> Self {
        Self {
            submit_dir: submit_dir.into(),
            program: "condor_submit".to_string(),
            program_args: Vec::new(),
            timeout: SUBMIT_TIMEOUT,
        }
    }

    /// Override the submit command. `args` go before the submit file path.
    pub fn with_command(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.program_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn submit_path(&self, config: &SchedulerConfig) -> PathBuf {
        self.submit_dir.join(format!("{}.sub", config.name()))
    }

    fn write_submit_file(&self, path: &Path, config: &SchedulerConfig) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.submit_dir)?;
        std::fs::write(path, config.render())
    }
}

#[async_trait]
impl SchedulerSink for CondorSubmitSink {
    async fn submit(&self, config: &SchedulerConfig) -> Result<ClusterId, SchedulerError> {
        let path = self.submit_path(config);
        self.write_submit_file(&path, config)?;
        tracing::info!(
            submit_file = %path.display(),
            jobs = config.len(),
            "submitting to condor"
        );

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.program_args).arg(&path).current_dir(&self.submit_dir);
        let output = run_with_timeout(cmd, self.timeout, &self.program)
            .await
            .map_err(SchedulerError::SubmitFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(SchedulerError::SubmitFailed(format!(
                "{} exited {}: {}",
                self.program,
                exit_code,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_cluster_id(&stdout).ok_or_else(|| SchedulerError::UnparsedOutput(stdout.trim().to_string()))
    }
}

/// Extract the cluster id from `condor_submit` output such as
/// `3 job(s) submitted to cluster 1234.`
pub fn parse_cluster_id(output: &str) -> Option<ClusterId> {
    const MARKER: &str = "submitted to cluster ";
    let start = output.find(MARKER)? + MARKER.len();
    let digits: String = output[start..].chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok().map(ClusterId)
}

#[cfg(test)]
#[path = "condor_tests.rs"]
mod tests;
