//! `sf query` specs: segment resolution to a table on disk.

use std::ffi::OsStr;

use crate::prelude::*;
use crate::prelude::assert_eq;

fn query(project: &Project, extra: &[&str]) -> CliBuilder {
    let source = project.join("segments.json");
    let out = project.join("out/segments.txt");
    cli()
        .args(["query", "--start", "0", "--end", "100", "--chunk-size", "30"])
        .args([OsStr::new("--source"), source.as_os_str(), OsStr::new("-f"), out.as_os_str()])
        .args(extra)
}

fn project() -> Project {
    let project = Project::empty();
    project.file(
        "segments.json",
        r#"{
            "H1:DCS-ANALYSIS_READY_C01:1": [[10, 90]],
            "H1_DATA": [[0, 50]]
        }"#,
    );
    project
}

#[test]
fn writes_chunked_segment_table() {
    let project = project();
    query(&project, &["--ifo", "H1"]).passes().stdout_has("Wrote 3 segment(s)");

    assert_eq!(
        project.read("out/segments.txt"),
        "# seg\tstart\tstop\tduration\n0\t10\t40\t30\n1\t40\t70\t30\n2\t70\t90\t20\n"
    );
}

#[test]
fn existing_table_is_reused() {
    let project = project();
    project.file("out/segments.txt", "# seg\tstart\tstop\tduration\n0\t500\t600\t100\n");

    query(&project, &["--ifo", "H1"]).passes().stdout_has("Reused 1 segment(s)");
    assert!(project.read("out/segments.txt").contains("500"));
}

#[test]
fn force_requeries_existing_table() {
    let project = project();
    project.file("out/segments.txt", "# seg\tstart\tstop\tduration\n0\t500\t600\t100\n");

    query(&project, &["--ifo", "H1", "--force"]).passes().stdout_has("Wrote 3 segment(s)");
    assert!(!project.read("out/segments.txt").contains("500"));
}

#[test]
fn flags_are_intersected() {
    let project = project();
    let run = query(
        &project,
        &["--flag", "H1:DCS-ANALYSIS_READY_C01:1", "--flag", "H1_DATA", "-o", "json"],
    )
    .passes();

    let json = run.stdout_json();
    let segments = json["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["start"], 10.0);
    assert_eq!(segments[1]["end"], 50.0);
    assert_eq!(json["livetime"], 40.0);
}

#[test]
fn missing_credential_fails_without_writing() {
    let project = project();
    let cert = project.join("missing-cert.pem");
    query(&project, &["--ifo", "H1", "--credential", cert.to_str().unwrap()])
        .fails()
        .code_is(3)
        .stderr_has("Could not find the TLS certificate file");

    assert!(!project.join("out/segments.txt").exists());
}

#[test]
fn open_flags_need_no_credential() {
    let project = project();
    let cert = project.join("missing-cert.pem");
    query(&project, &["--flag", "H1_DATA", "--credential", cert.to_str().unwrap()])
        .passes()
        .stdout_has("Wrote 2 segment(s)");
}

#[test]
fn reversed_window_is_rejected() {
    let project = project();
    cli()
        .args(["query", "--start", "100", "--end", "0", "-f"])
        .args([project.join("out.txt")])
        .args(["--source"])
        .args([project.join("segments.json")])
        .fails()
        .code_is(2)
        .stderr_has("interval start must precede end");
}
