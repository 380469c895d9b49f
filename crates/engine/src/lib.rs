// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sf-engine: segment resolution, branch expansion and job dispatch

mod command;
mod config;
mod dispatcher;
mod error;
mod expander;
mod merger;
mod resolver;
mod workflow;

pub use command::{condor_arguments, FetchCommand};
pub use config::{FetchConfig, QueryConfig, SegflowConfig, WorkflowConfig};
pub use dispatcher::{DispatchReport, JobDispatcher};
pub use error::{ConfigError, DispatchError, ExpandError, ResolveError, WorkflowError};
pub use expander::{artifact_complete, expand_table, BranchExpander, BranchParams, GateState};
pub use merger::IntervalMerger;
pub use resolver::{persist, ResolveOutcome, ResolveRequest, SegmentResolver, DEFAULT_CHUNK_SIZE, MAX_CHUNKS, MIN_CHUNK_SIZE};
pub use workflow::Workflow;
