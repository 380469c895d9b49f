// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.
//!
//! Library crates take everything through explicit config; only this module
//! reads `SF_*` variables, and only to fill settings the config file left
//! empty.

use std::path::PathBuf;

use sf_engine::WorkflowConfig;

pub const LOG: &str = "SF_LOG";
pub const WORKING_DIRECTORY: &str = "SF_WORKING_DIRECTORY";
pub const ACCOUNTING_USER: &str = "SF_ACCOUNTING_USER";
pub const ACCOUNTING_GROUP: &str = "SF_ACCOUNTING_GROUP";
pub const CONDOR_SUBMIT: &str = "SF_CONDOR_SUBMIT";

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Log filter directive, `info` when unset.
pub fn log_filter() -> String {
    var(LOG).unwrap_or_else(|| "info".to_string())
}

/// Override for the `condor_submit` command line.
pub fn condor_submit() -> Option<String> {
    var(CONDOR_SUBMIT)
}

/// Fill empty workflow settings from the process environment.
pub fn fill_workflow(config: &mut WorkflowConfig) {
    fill_workflow_from(config, var);
}

/// Fill empty workflow settings using `lookup` for variable values.
pub fn fill_workflow_from(config: &mut WorkflowConfig, lookup: impl Fn(&str) -> Option<String>) {
    if config.working_directory.as_os_str().is_empty() {
        if let Some(dir) = lookup(WORKING_DIRECTORY) {
            config.working_directory = PathBuf::from(dir);
        }
    }
    if config.accounting_user.is_empty() {
        if let Some(user) = lookup(ACCOUNTING_USER) {
            config.accounting_user = user;
        }
    }
    if config.accounting_group.is_empty() {
        if let Some(group) = lookup(ACCOUNTING_GROUP) {
            config.accounting_group = group;
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
