//! `sf submit` specs: both workflow phases end to end.

use crate::prelude::*;
use crate::prelude::assert_eq;

fn submit(project: &Project) -> CliBuilder {
    cli()
        .args(["submit", "--start", "0", "--end", "100", "--condor-submit", project.submit_command().as_str(), "-c"])
        .args([project.join("sf.toml")])
}

#[test]
fn submit_resolves_and_queues_every_chunk() {
    let project = Project::workflow();
    submit(&project).passes().stdout_has("Submitted 3 job(s) to cluster 4242");

    assert!(project.join("data/segments.txt").exists());
    let description = project.read("condor/deepclean.sub");
    assert_eq!(description.matches("queue\n").count(), 3);
    assert!(description.contains("accounting_group_user = albert.einstein"));
    assert!(description.contains("deepclean-$(Cluster).log"));
    assert!(description.contains("--start 40 --end 70"));
}

#[test]
fn resubmit_skips_finished_branches() {
    let project = Project::workflow();
    submit(&project).passes();
    project.file("data/deepclean-10-30.hdf5", "data");
    project.file("data/deepclean-70-20.hdf5", "data");

    let run = submit(&project).args(["-o", "json"]).passes();
    let json = run.stdout_json();
    assert_eq!(json["submitted"], serde_json::json!([2]));
    assert_eq!(json["skipped"], serde_json::json!([1, 3]));
}

#[test]
fn nothing_left_to_submit() {
    let project = Project::workflow();
    submit(&project).passes();
    for name in ["deepclean-10-30.hdf5", "deepclean-40-30.hdf5", "deepclean-70-20.hdf5"] {
        project.file(&format!("data/{}", name), "data");
    }
    submit(&project).passes().stdout_has("All 3 branch(es) complete");
}

#[test]
fn accounting_user_can_come_from_environment() {
    let project = Project::workflow();
    project.file("sf.toml", &project.config(false));

    submit(&project).fails().code_is(2).stderr_has("workflow.accounting_user");
    submit(&project).env("SF_ACCOUNTING_USER", "albert.einstein").passes();
}

#[test]
fn failing_submit_command_is_reported() {
    let project = Project::workflow();
    project.file("stub_submit.sh", "echo 'ERROR: schedd unreachable' >&2\nexit 1\n");
    submit(&project).fails().code_is(1).stderr_has("schedd unreachable");
}
