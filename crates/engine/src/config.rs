// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow configuration.
//!
//! Everything the workflow needs is passed in explicitly; nothing here reads
//! the process environment. Loaded from TOML:
//!
//! ```toml
//! [workflow]
//! name = "deepclean"
//! working_directory = "/home/albert.einstein/condor"
//! accounting_user = "albert.einstein"
//! accounting_group = "ligo.dev.o4.detchar.subtraction.deepclean"
//!
//! [query]
//! ifo = "H1"
//! flags = ["DCS-ANALYSIS_READY_C01:1"]
//! min_duration = 1024
//!
//! [fetch]
//! data_dir = "/home/albert.einstein/data"
//! sample_rate = 4096
//! strain_channel = "H1:GDS-CALIB_STRAIN"
//! witnesses = ["H1:PEM-CS_MAINSMON_EBAY_1_DQ"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sf_core::{Flag, ResourceSize, TimeRange, DEFAULT_ARTIFACT_EXT};

use crate::command::FetchCommand;
use crate::error::ConfigError;
use crate::expander::BranchParams;
use crate::resolver::{ResolveRequest, DEFAULT_CHUNK_SIZE};

/// Scheduler-facing settings shared by every submitted job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub working_directory: PathBuf,
    #[serde(default)]
    pub accounting_user: String,
    #[serde(default)]
    pub accounting_group: String,
    #[serde(default = "default_request")]
    pub memory_request: ResourceSize,
    #[serde(default = "default_request")]
    pub disk_request: ResourceSize,
}

impl WorkflowConfig {
    pub fn new(
        working_directory: impl Into<PathBuf>,
        accounting_user: impl Into<String>,
        accounting_group: impl Into<String>,
    ) -> Self {
        Self {
            name: default_name(),
            working_directory: working_directory.into(),
            accounting_user: accounting_user.into(),
            accounting_group: accounting_group.into(),
            memory_request: default_request(),
            disk_request: default_request(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.working_directory.as_os_str().is_empty() {
            return Err(ConfigError::Missing("workflow.working_directory"));
        }
        if self.accounting_user.is_empty() {
            return Err(ConfigError::Missing("workflow.accounting_user"));
        }
        if self.accounting_group.is_empty() {
            return Err(ConfigError::Missing("workflow.accounting_group"));
        }
        Ok(())
    }
}

/// Which segments to query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Detector prefix applied to every flag, e.g. `H1`.
    #[serde(default)]
    pub ifo: Option<String>,
    #[serde(default = "default_flags")]
    pub flags: Vec<String>,
    #[serde(default)]
    pub min_duration: Option<f64>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: Option<f64>,
    /// JSON segment document to query instead of a live service.
    #[serde(default)]
    pub segments_source: Option<PathBuf>,
    /// Credential file required for restricted flags.
    #[serde(default)]
    pub credential: Option<PathBuf>,
    /// Extra keyword parameters forwarded to the segment source.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            ifo: None,
            flags: default_flags(),
            min_duration: None,
            chunk_size: default_chunk_size(),
            segments_source: None,
            credential: None,
            params: BTreeMap::new(),
        }
    }
}

impl QueryConfig {
    /// Flags with the detector prefix applied.
    pub fn qualified_flags(&self) -> Vec<Flag> {
        self.flags
            .iter()
            .map(|name| match &self.ifo {
                Some(ifo) => Flag::qualified(ifo, name),
                None => Flag::from(name.as_str()),
            })
            .collect()
    }

    pub fn request(&self, range: TimeRange) -> ResolveRequest {
        let mut request = ResolveRequest::new(range).flags(self.qualified_flags());
        if let Some(min) = self.min_duration.filter(|m| *m > 0.0) {
            request = request.min_duration(min);
        }
        if let Some(chunk) = self.chunk_size {
            request = request.chunk_size(chunk);
        }
        request
    }
}

/// Per-branch fetch job settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    pub sample_rate: f64,
    pub strain_channel: String,
    #[serde(default)]
    pub witnesses: Vec<String>,
    /// Segment table location; defaults to `{data_dir}/segments.txt`.
    #[serde(default)]
    pub segments_file: Option<PathBuf>,
    /// Program (and leading arguments) that implements `fetch`.
    #[serde(default = "default_executable")]
    pub executable: Vec<String>,
    #[serde(default = "default_ext")]
    pub artifact_ext: String,
}

impl FetchConfig {
    pub fn segments_path(&self) -> PathBuf {
        self.segments_file.clone().unwrap_or_else(|| self.data_dir.join("segments.txt"))
    }

    /// Strain channel first, then witnesses.
    pub fn channels(&self) -> Vec<String> {
        std::iter::once(self.strain_channel.clone()).chain(self.witnesses.iter().cloned()).collect()
    }

    pub fn branch_params(&self) -> BranchParams {
        BranchParams { channels: self.channels(), sample_rate: self.sample_rate, prefix: self.prefix.clone() }
    }

    pub fn command(&self) -> Result<FetchCommand, ConfigError> {
        let (program, leading) =
            self.executable.split_first().ok_or(ConfigError::Missing("fetch.executable"))?;
        Ok(FetchCommand::new(program.clone(), &self.data_dir).with_leading_args(leading.to_vec()))
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegflowConfig {
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub query: QueryConfig,
    pub fetch: FetchConfig,
}

impl SegflowConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn default_name() -> String {
    "segflow".to_string()
}

fn default_request() -> ResourceSize {
    ResourceSize::gigabytes(10)
}

fn default_flags() -> Vec<String> {
    vec!["DCS-ANALYSIS_READY_C01:1".to_string()]
}

fn default_chunk_size() -> Option<f64> {
    Some(DEFAULT_CHUNK_SIZE)
}

fn default_prefix() -> String {
    "deepclean".to_string()
}

fn default_executable() -> Vec<String> {
    vec!["sf-fetch".to_string()]
}

fn default_ext() -> String {
    DEFAULT_ARTIFACT_EXT.to_string()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
