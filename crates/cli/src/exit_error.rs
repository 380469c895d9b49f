// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly; `main()` owns process termination.

use std::fmt;

use sf_engine::{ConfigError, ResolveError, WorkflowError};

/// Bad or incomplete configuration.
pub const EXIT_CONFIG: i32 = 2;
/// Restricted flags still rejected after re-authenticating.
pub const EXIT_AUTH: i32 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<ConfigError> for ExitError {
    fn from(e: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, e.to_string())
    }
}

impl From<ResolveError> for ExitError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Auth(_) => Self::new(EXIT_AUTH, e.to_string()),
            ResolveError::InvalidRequest(_) => Self::new(EXIT_CONFIG, e.to_string()),
            _ => Self::new(1, e.to_string()),
        }
    }
}

impl From<WorkflowError> for ExitError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::Resolve(e) => e.into(),
            other => Self::new(1, other.to_string()),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
