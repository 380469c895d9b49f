//! `sf branches` specs: the pending/expanded gate as seen from the CLI.

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn branches_pending_before_segment_table() {
    let project = Project::workflow();
    cli()
        .args(["branches", "-c"])
        .args([project.join("sf.toml")])
        .passes()
        .stdout_has("pending");
}

#[test]
fn branches_list_artifact_status() {
    let project = Project::workflow();
    project.file("data/segments.txt", "# seg\tstart\tstop\tduration\n0\t10\t40\t30\n1\t40\t70\t30\n");
    project.file("data/deepclean-40-30.hdf5", "data");

    let run = cli()
        .args(["branches", "-o", "json", "-c"])
        .args([project.join("sf.toml")])
        .passes();
    let json = run.stdout_json();
    assert_eq!(json["state"], "expanded");
    let branches = json["branches"].as_array().unwrap();
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0]["artifact"], "deepclean-10-30.hdf5");
    assert_eq!(branches[0]["complete"], false);
    assert_eq!(branches[1]["complete"], true);
}

#[test]
fn malformed_segment_table_fails() {
    let project = Project::workflow();
    project.file("data/segments.txt", "# seg\tstart\tstop\tduration\n0\t10\n");
    cli()
        .args(["branches", "-c"])
        .args([project.join("sf.toml")])
        .fails()
        .stderr_has("malformed segment table");
}
