// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sf query`: resolve segments and write the segment table.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sf_adapters::{JsonSegmentSource, NoopAuthenticator};
use sf_engine::{persist, IntervalMerger, QueryConfig, ResolveOutcome, SegmentResolver, DEFAULT_CHUNK_SIZE};

use crate::exit_error::ExitError;
use crate::output::{print_table, OutputFormat};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Start of the query window, in GPS seconds
    #[arg(long)]
    pub start: f64,

    /// End of the query window, in GPS seconds
    #[arg(long)]
    pub end: f64,

    /// Data-quality flag that must be active (repeatable)
    #[arg(long = "flag")]
    pub flags: Vec<String>,

    /// Detector prefix applied to every flag, e.g. H1
    #[arg(long)]
    pub ifo: Option<String>,

    /// Drop segments shorter than this many seconds
    #[arg(long)]
    pub min_duration: Option<f64>,

    /// Split segments into chunks of at most this many seconds
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: f64,

    /// JSON document of per-flag segments
    #[arg(long)]
    pub source: PathBuf,

    /// Credential file required for restricted flags
    #[arg(long)]
    pub credential: Option<PathBuf>,

    /// Where to write the segment table
    #[arg(long, short = 'f')]
    pub output_file: PathBuf,

    /// Query again even if the segment table already exists
    #[arg(long)]
    pub force: bool,
}

impl QueryArgs {
    fn query_config(&self) -> QueryConfig {
        let defaults = QueryConfig::default();
        QueryConfig {
            ifo: self.ifo.clone(),
            flags: if self.flags.is_empty() { defaults.flags.clone() } else { self.flags.clone() },
            min_duration: self.min_duration,
            chunk_size: Some(self.chunk_size),
            segments_source: Some(self.source.clone()),
            credential: self.credential.clone(),
            ..defaults
        }
    }
}

pub async fn handle(args: QueryArgs, format: OutputFormat) -> Result<()> {
    let range = super::time_range(args.start, args.end)?;
    let query = args.query_config();

    let mut source = JsonSegmentSource::new(&args.source);
    if let Some(cert) = &args.credential {
        source = source.with_credential(cert);
    }
    let resolver = SegmentResolver::new(IntervalMerger::new(source, NoopAuthenticator));
    let request = query.request(range);

    let outcome = if args.force {
        let table = resolver.resolve(&request).await.map_err(ExitError::from)?;
        persist(&table, &args.output_file).map_err(ExitError::from)?;
        ResolveOutcome::Resolved(table)
    } else {
        resolver.resolve_to_file(&request, &args.output_file).await.map_err(ExitError::from)?
    };

    let reused = matches!(outcome, ResolveOutcome::Existing(_));
    print_table(outcome.table(), &args.output_file, reused, format)
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
