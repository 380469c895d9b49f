// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for each workflow phase.

use std::path::PathBuf;

use sf_adapters::{SchedulerError, SourceError};
use sf_core::ChunkTableError;
use thiserror::Error;

/// Segment resolution failures. Any of these aborts the whole resolution and
/// nothing is persisted.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid resolve request: {0}")]
    InvalidRequest(String),
    /// Credential still rejected after one re-authentication.
    #[error("restricted query failed after re-authenticating: {0}")]
    Auth(SourceError),
    #[error(transparent)]
    Query(SourceError),
    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Branch expansion failures. A malformed upstream artifact is fatal.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed segment table {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: ChunkTableError,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
}

/// Any failure from a full workflow pass.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Expand(#[from] ExpandError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
