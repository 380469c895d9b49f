// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sf branches`: show the branch map and which artifacts are done.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sf_engine::BranchExpander;

use crate::exit_error::ExitError;
use crate::output::{print_branches, OutputFormat};

#[derive(Args, Debug)]
pub struct BranchesArgs {
    /// Workflow config file
    #[arg(long, short = 'c')]
    pub config: PathBuf,
}

pub async fn handle(args: BranchesArgs, format: OutputFormat) -> Result<()> {
    let config = super::load_config(&args.config)?;
    let fetch = &config.fetch;

    let expander = BranchExpander::new(fetch.segments_path(), fetch.branch_params());
    let state = expander.poll().map_err(|e| ExitError::new(1, e.to_string()))?;
    let map = expander.branch_map().map_err(|e| ExitError::new(1, e.to_string()))?;

    print_branches(state, &map, &fetch.data_dir, &fetch.artifact_ext, format)
}
