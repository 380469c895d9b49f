// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sf-adapters: segment query and batch scheduler adapters

pub mod scheduler;
pub mod segments;
pub mod subprocess;

pub use scheduler::{ClusterId, CondorSubmitSink, SchedulerError, SchedulerSink};
pub use segments::{
    Authenticator, FlagSegments, JsonSegmentSource, NoopAuthenticator, SegmentQuery,
    SegmentSource, SourceError,
};

#[cfg(any(test, feature = "test-support"))]
pub use scheduler::FakeScheduler;
#[cfg(any(test, feature = "test-support"))]
pub use segments::{FakeAuthenticator, FakeSegmentSource};
