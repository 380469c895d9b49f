// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sf submit`: resolve segments if needed, then submit pending branches.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sf_adapters::{CondorSubmitSink, JsonSegmentSource, NoopAuthenticator};
use sf_engine::{ConfigError, SegflowConfig, Workflow};

use crate::exit_error::ExitError;
use crate::output::{print_report, OutputFormat};

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Workflow config file
    #[arg(long, short = 'c')]
    pub config: PathBuf,

    /// Start of the query window, in GPS seconds
    #[arg(long)]
    pub start: f64,

    /// End of the query window, in GPS seconds
    #[arg(long)]
    pub end: f64,

    /// Submit command line [default: condor_submit, or $SF_CONDOR_SUBMIT]
    #[arg(long)]
    pub condor_submit: Option<String>,
}

/// Split a submit command line into program and leading arguments.
pub(crate) fn submit_command(line: &str) -> Option<(String, Vec<String>)> {
    let mut words = line.split_whitespace().map(str::to_string);
    let program = words.next()?;
    Some((program, words.collect()))
}

fn segment_source(config: &SegflowConfig) -> Result<JsonSegmentSource, ConfigError> {
    let path = config.query.segments_source.as_ref().ok_or(ConfigError::Missing("query.segments_source"))?;
    let mut source = JsonSegmentSource::new(path);
    if let Some(cert) = &config.query.credential {
        source = source.with_credential(cert);
    }
    Ok(source)
}

pub async fn handle(args: SubmitArgs, format: OutputFormat) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let range = super::time_range(args.start, args.end)?;

    let source = segment_source(&config).map_err(ExitError::from)?;
    let workflow = Workflow::from_config(&config, range, source, NoopAuthenticator).map_err(ExitError::from)?;

    let mut sink = CondorSubmitSink::new(&config.workflow.working_directory);
    if let Some((program, leading)) =
        args.condor_submit.or_else(crate::env::condor_submit).as_deref().and_then(submit_command)
    {
        sink = sink.with_command(program, leading);
    }

    let report = workflow.run(&sink).await.map_err(ExitError::from)?;
    print_report(&report, format)
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
