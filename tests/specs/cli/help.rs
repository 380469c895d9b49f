//! CLI help output specs

use crate::prelude::*;

#[test]
fn sf_no_args_shows_usage() {
    cli().fails().code_is(2).stderr_has("Usage:");
}

#[test]
fn sf_help_lists_commands() {
    cli().args(["--help"]).passes().stdout_has("query").stdout_has("branches").stdout_has("submit");
}

#[test]
fn sf_query_help_shows_chunk_default() {
    cli().args(["query", "--help"]).passes().stdout_has("--chunk-size").stdout_has("20000");
}

#[test]
fn sf_version_shows_version() {
    cli().args(["--version"]).passes().stdout_has("0.2");
}
