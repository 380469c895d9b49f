// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sf-core: interval algebra and job-graph data model for segflow

pub mod macros;

pub mod branch;
pub mod chunk;
pub mod chunk_table;
pub mod flag;
pub mod interval_set;
pub mod range;
pub mod resource;
pub mod submit;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use branch::{artifact_name, BranchData, BranchMap, DEFAULT_ARTIFACT_EXT};
pub use chunk::{chunk_count, split};
pub use chunk_table::{ChunkRow, ChunkTable, ChunkTableError};
pub use flag::{Flag, FlagAccess, FlagRegistry, PartitionedFlags, OPEN_DATA_FLAGS};
pub use interval_set::IntervalSet;
pub use range::{IntervalError, TimeRange};
pub use resource::{ResourceSize, ResourceSizeError, SizeUnit};
pub use submit::{SchedulerConfig, SubmissionRecord, CLUSTER_PLACEHOLDER};
