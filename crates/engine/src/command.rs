// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-branch fetch command lines.

use std::path::PathBuf;

use sf_core::BranchData;

/// Builds `<program...> fetch --start ... --channels [...]` for a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCommand {
    executable: String,
    leading_args: Vec<String>,
    output_directory: PathBuf,
}

impl FetchCommand {
    pub fn new(executable: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(), leading_args: Vec::new(), output_directory: output_directory.into() }
    }

    /// Arguments placed before the `fetch` subcommand, e.g. a script path.
    pub fn with_leading_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Arguments for `branch`, excluding the executable.
    pub fn arguments(&self, branch: &BranchData) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend([
            "fetch".to_string(),
            "--start".to_string(),
            branch.start.to_string(),
            "--end".to_string(),
            branch.end().to_string(),
            "--sample-rate".to_string(),
            branch.sample_rate.to_string(),
            "--prefix".to_string(),
            branch.prefix.clone(),
            "--output-directory".to_string(),
            self.output_directory.display().to_string(),
            "--channels".to_string(),
            format!("[{}]", branch.channels.join(",")),
        ]);
        args
    }

    pub fn argv(&self, branch: &BranchData) -> Vec<String> {
        let mut argv = vec![self.executable.clone()];
        argv.extend(self.arguments(branch));
        argv
    }
}

/// Join arguments in HTCondor's quoted `arguments` syntax: the whole list in
/// double quotes, arguments containing whitespace or a single quote wrapped in
/// single quotes and embedded quotes doubled.
pub fn condor_arguments(args: &[String]) -> String {
    let quoted: Vec<String> = args
        .iter()
        .map(|arg| {
            let escaped = arg.replace('"', "\"\"").replace('\'', "''");
            if escaped.is_empty() || arg.contains('\'') || escaped.chars().any(char::is_whitespace) {
                format!("'{}'", escaped)
            } else {
                escaped
            }
        })
        .collect();
    format!("\"{}\"", quoted.join(" "))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
