// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Distributed batch scheduler sinks.
//!
//! The scheduler is consumed, not modelled: a sink accepts a finished
//! [`SchedulerConfig`] and reports the cluster id it was assigned.

mod condor;

pub use condor::{parse_cluster_id, CondorSubmitSink};

use async_trait::async_trait;
use sf_core::SchedulerConfig;
use thiserror::Error;

/// Scheduler-assigned id for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId(pub u64);

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from scheduler submission
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("submit failed: {0}")]
    SubmitFailed(String),
    #[error("could not read cluster id from scheduler output: {0}")]
    UnparsedOutput(String),
}

/// Adapter for submitting job descriptions to a batch scheduler
#[async_trait]
pub trait SchedulerSink: Clone + Send + Sync + 'static {
    async fn submit(&self, config: &SchedulerConfig) -> Result<ClusterId, SchedulerError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ClusterId, SchedulerConfig, SchedulerError, SchedulerSink};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeSchedulerState {
        next_cluster: u64,
        submissions: Vec<SchedulerConfig>,
        fail_with: Option<String>,
    }

    /// Fake scheduler that records every submission.
    #[derive(Clone)]
    pub struct FakeScheduler {
        inner: Arc<Mutex<FakeSchedulerState>>,
    }

    impl Default for FakeScheduler {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeSchedulerState {
                    next_cluster: 100,
                    submissions: Vec::new(),
                    fail_with: None,
                })),
            }
        }
    }

    impl FakeScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every later submission fail with `message`.
        pub fn fail_with(&self, message: impl Into<String>) {
            self.inner.lock().fail_with = Some(message.into());
        }

        pub fn submissions(&self) -> Vec<SchedulerConfig> {
            self.inner.lock().submissions.clone()
        }
    }

    #[async_trait]
    impl SchedulerSink for FakeScheduler {
        async fn submit(&self, config: &SchedulerConfig) -> Result<ClusterId, SchedulerError> {
            let mut state = self.inner.lock();
            if let Some(message) = &state.fail_with {
                return Err(SchedulerError::SubmitFailed(message.clone()));
            }
            state.submissions.push(config.clone());
            let id = ClusterId(state.next_cluster);
            state.next_cluster += 1;
            Ok(id)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeScheduler;
