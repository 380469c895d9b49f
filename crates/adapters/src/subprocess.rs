// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with a deadline.

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

/// Timeout for handing a submit description to the scheduler.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Run a command to completion, killing it if it outlives `timeout`.
///
/// `label` names the command in error messages.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(format!("{} failed to run: {}", label, e)),
        Err(_) => Err(format!("{} timed out after {:?}", label, timeout)),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
