// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream data-quality segment sources.

mod json;

pub use json::JsonSegmentSource;

use std::collections::BTreeMap;

use async_trait::async_trait;
use sf_core::{Flag, IntervalSet, TimeRange};
use thiserror::Error;

/// Message prefixes that identify a missing or expired credential.
pub const AUTH_ERROR_PREFIXES: [&str; 2] =
    ["Could not find the TLS certificate file", "certificate has expired"];

/// Errors from segment queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Credential missing or expired; recoverable by re-authenticating.
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("segment query failed: {0}")]
    Query(String),
}

impl SourceError {
    /// Classify a raw failure message from the query service.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if AUTH_ERROR_PREFIXES.iter().any(|p| message.starts_with(p)) {
            SourceError::Auth(message)
        } else {
            SourceError::Query(message)
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, SourceError::Auth(_))
    }
}

/// Per-flag activity returned by a source. Flags the source knows nothing
/// about may be absent.
pub type FlagSegments = BTreeMap<Flag, IntervalSet>;

/// One request to a segment source.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentQuery {
    pub flags: Vec<Flag>,
    pub range: TimeRange,
    pub authenticated: bool,
    /// Source-specific keyword parameters, passed through untouched.
    pub params: BTreeMap<String, String>,
}

/// Adapter for the flag query service
#[async_trait]
pub trait SegmentSource: Clone + Send + Sync + 'static {
    async fn query(&self, query: &SegmentQuery) -> Result<FlagSegments, SourceError>;
}

/// Hook for refreshing credentials between a failed and a retried query.
#[async_trait]
pub trait Authenticator: Clone + Send + Sync + 'static {
    async fn authenticate(&self) -> Result<(), SourceError>;
}

/// Authenticator for environments where credentials are managed externally.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAuthenticator;

#[async_trait]
impl Authenticator for NoopAuthenticator {
    async fn authenticate(&self) -> Result<(), SourceError> {
        tracing::debug!("credentials are managed externally, nothing to renew");
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAuthenticator, FakeSegmentSource};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
