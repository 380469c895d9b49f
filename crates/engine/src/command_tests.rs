// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sf_core::test_support::branch;

#[test]
fn fetch_argv_matches_cli_contract() {
    let cmd = FetchCommand::new("/opt/env/bin/python", "/data")
        .with_leading_args(vec!["/opt/deepclean/projects/data/data".into()]);
    let mut data = branch(2, 40.0, 30.0);
    data.channels.push("H1:PEM-CS_ACC_1".into());

    assert_eq!(
        cmd.argv(&data),
        vec![
            "/opt/env/bin/python",
            "/opt/deepclean/projects/data/data",
            "fetch",
            "--start",
            "40",
            "--end",
            "70",
            "--sample-rate",
            "4096",
            "--prefix",
            "deepclean",
            "--output-directory",
            "/data",
            "--channels",
            "[H1:GDS-CALIB_STRAIN,H1:PEM-CS_ACC_1]",
        ]
    );
    assert_eq!(cmd.executable(), "/opt/env/bin/python");
    assert_eq!(cmd.arguments(&data).len(), cmd.argv(&data).len() - 1);
}

#[test]
fn fractional_times_are_preserved() {
    let cmd = FetchCommand::new("sf-fetch", "/data");
    let args = cmd.arguments(&branch(1, 10.5, 19.25));
    assert_eq!(&args[1..5], &["--start", "10.5", "--end", "29.75"]);
}

#[yare::parameterized(
    plain        = { &["fetch", "--start", "10"],   "\"fetch --start 10\"" },
    with_space   = { &["a b", "c"],                 "\"'a b' c\"" },
    double_quote = { &["say\"hi"],                  "\"say\"\"hi\"" },
    single_quote = { &["it's here"],                "\"'it''s here'\"" },
    apostrophe   = { &["it's"],                     "\"'it''s'\"" },
    empty_arg    = { &["", "x"],                    "\"'' x\"" },
)]
fn condor_quoting(args: &[&str], expected: &str) {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    assert_eq!(condor_arguments(&args), expected);
}
