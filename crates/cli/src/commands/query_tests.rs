// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    args: QueryArgs,
}

fn parse(extra: &[&str]) -> QueryArgs {
    let mut argv = vec!["test", "--start", "0", "--end", "100", "--source", "s.json", "-f", "out.txt"];
    argv.extend_from_slice(extra);
    Cli::try_parse_from(argv).unwrap().args
}

#[test]
fn chunk_size_defaults_to_twenty_thousand() {
    let args = parse(&[]);
    assert_eq!(args.chunk_size, 20_000.0);
    assert!(!args.force);
}

#[test]
fn no_flags_falls_back_to_analysis_ready() {
    let config = parse(&["--ifo", "L1"]).query_config();
    let flags: Vec<String> = config.qualified_flags().iter().map(|f| f.to_string()).collect();
    assert_eq!(flags, vec!["L1:DCS-ANALYSIS_READY_C01:1"]);
}

#[test]
fn repeated_flags_are_collected() {
    let args = parse(&["--flag", "H1:A:1", "--flag", "H1:B:1", "--min-duration", "64"]);
    assert_eq!(args.flags, vec!["H1:A:1", "H1:B:1"]);
    let config = args.query_config();
    assert_eq!(config.min_duration, Some(64.0));
    assert_eq!(config.segments_source, Some(PathBuf::from("s.json")));
}

#[test]
fn missing_window_is_rejected() {
    assert!(Cli::try_parse_from(["test", "--source", "s.json", "-f", "out.txt"]).is_err());
}
