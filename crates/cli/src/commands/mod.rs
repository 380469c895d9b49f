// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod branches;
pub mod query;
pub mod submit;

use std::path::Path;

use sf_core::TimeRange;
use sf_engine::SegflowConfig;

use crate::exit_error::{ExitError, EXIT_CONFIG};

/// Load a config file and fill empty workflow settings from the environment.
pub(crate) fn load_config(path: &Path) -> Result<SegflowConfig, ExitError> {
    let mut config = SegflowConfig::load(path)?;
    crate::env::fill_workflow(&mut config.workflow);
    tracing::debug!(path = %path.display(), workflow = %config.workflow.name, "loaded config");
    Ok(config)
}

pub(crate) fn time_range(start: f64, end: f64) -> Result<TimeRange, ExitError> {
    TimeRange::new(start, end).map_err(|e| ExitError::new(EXIT_CONFIG, e.to_string()))
}
