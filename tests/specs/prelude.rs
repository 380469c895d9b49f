// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for driving the `sf` binary.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub use similar_asserts::assert_eq;

const SF_VARS: [&str; 4] =
    ["SF_WORKING_DIRECTORY", "SF_ACCOUNTING_USER", "SF_ACCOUNTING_GROUP", "SF_CONDOR_SUBMIT"];

/// Start building an `sf` invocation with a clean `SF_*` environment.
pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("sf").unwrap();
    for var in SF_VARS {
        cmd.env_remove(var);
    }
    cmd.env("SF_LOG", "info");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn run(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        RunAssert {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Run and assert a zero exit status.
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(run.code == Some(0), "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}", run.code, run.stdout, run.stderr);
        run
    }

    /// Run and assert a non-zero exit status.
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(run.code != Some(0), "expected failure\nstdout:\n{}", run.stdout);
        run
    }
}

pub struct RunAssert {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunAssert {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {:?}:\n{}", needle, self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {:?}:\n{}", needle, self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {:?}:\n{}", needle, self.stderr);
        self
    }

    pub fn code_is(self, code: i32) -> Self {
        assert_eq!(self.code, Some(code), "stderr:\n{}", self.stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// A scratch directory holding configs, segment documents and outputs.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).unwrap()
    }

    /// A workflow project: segment document, config, and a stub submit
    /// script that reports cluster 4242.
    pub fn workflow() -> Self {
        let project = Self::empty();
        project.file("segments.json", r#"{ "H1:DCS-ANALYSIS_READY_C01:1": [[10, 90]] }"#);
        project.file("stub_submit.sh", "echo \"3 job(s) submitted to cluster 4242.\"\n");
        project.file("sf.toml", &project.config(true));
        project
    }

    pub fn config(&self, with_user: bool) -> String {
        let user = if with_user { "accounting_user = \"albert.einstein\"\n" } else { "" };
        format!(
            r#"
[workflow]
name = "deepclean"
working_directory = "{root}/condor"
{user}accounting_group = "ligo.dev.o4.detchar"

[query]
ifo = "H1"
min_duration = 0
chunk_size = 30
segments_source = "{root}/segments.json"

[fetch]
data_dir = "{root}/data"
sample_rate = 4096
strain_channel = "H1:GDS-CALIB_STRAIN"
executable = ["sf-fetch"]
"#,
            root = self.path().display(),
            user = user,
        )
    }

    pub fn submit_command(&self) -> String {
        format!("sh {}", self.join("stub_submit.sh").display())
    }
}
