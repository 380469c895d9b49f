// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sf_adapters::{FakeAuthenticator, FakeScheduler, FakeSegmentSource, SourceError};

struct Fixture {
    _dir: tempfile::TempDir,
    data_dir: PathBuf,
    source: FakeSegmentSource,
    workflow: Workflow<FakeSegmentSource, FakeAuthenticator>,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let text = format!(
        r#"
[workflow]
name = "deepclean"
working_directory = "{work}"
accounting_user = "albert.einstein"
accounting_group = "ligo.dev"

[query]
flags = ["F1"]
min_duration = 0
chunk_size = 30

[fetch]
data_dir = "{data}"
sample_rate = 4096
strain_channel = "H1:GDS-CALIB_STRAIN"
"#,
        work = dir.path().display(),
        data = data_dir.display(),
    );
    let config = SegflowConfig::parse(&text).unwrap();
    let source = FakeSegmentSource::new();
    source.set_flag("F1", &[(10.0, 90.0)]);
    let range = TimeRange::new(0.0, 100.0).unwrap();
    let workflow = Workflow::from_config(&config, range, source.clone(), FakeAuthenticator::new()).unwrap();
    Fixture { _dir: dir, data_dir, source, workflow }
}

#[tokio::test]
async fn submit_before_resolve_is_pending() {
    let f = fixture();
    let sink = FakeScheduler::new();

    let report = f.workflow.submit(&sink).await.unwrap();
    assert_eq!(report, DispatchReport::pending());
    assert_eq!(f.workflow.state(), GateState::Pending);
    assert!(sink.submissions().is_empty());
}

#[tokio::test]
async fn run_expands_and_submits_every_chunk() {
    let f = fixture();
    let sink = FakeScheduler::new();

    let report = f.workflow.run(&sink).await.unwrap();
    assert_eq!(f.workflow.state(), GateState::Expanded);
    assert_eq!(report.submitted, vec![1, 2, 3]);
    assert!(f.workflow.segments_file().exists());

    let submissions = sink.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].len(), 3);
}

#[tokio::test]
async fn rerun_skips_finished_branches_and_reuses_table() {
    let f = fixture();
    let sink = FakeScheduler::new();
    f.workflow.run(&sink).await.unwrap();
    let queries = f.source.calls().len();

    std::fs::write(f.data_dir.join("deepclean-10-30.hdf5"), b"data").unwrap();
    std::fs::write(f.data_dir.join("deepclean-40-30.hdf5"), b"data").unwrap();

    let report = f.workflow.run(&sink).await.unwrap();
    assert_eq!(report.submitted, vec![3]);
    assert_eq!(report.skipped, vec![1, 2]);
    assert_eq!(f.source.calls().len(), queries, "existing table must not be re-queried");
    assert!(matches!(f.workflow.resolve().await.unwrap(), ResolveOutcome::Existing(_)));
}

#[tokio::test]
async fn failed_resolution_writes_nothing() {
    let f = fixture();
    f.source.push_error(SourceError::Query("segment service unavailable".to_string()));
    let sink = FakeScheduler::new();

    let err = f.workflow.run(&sink).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Resolve(ResolveError::Query(_))), "{:?}", err);
    assert!(!f.workflow.segments_file().exists());
    assert_eq!(f.workflow.state(), GateState::Pending);
    assert!(sink.submissions().is_empty());
}

#[tokio::test]
async fn malformed_table_is_fatal() {
    let f = fixture();
    std::fs::create_dir_all(&f.data_dir).unwrap();
    std::fs::write(f.workflow.segments_file(), "# seg\tstart\tstop\tduration\n0\t10\n").unwrap();

    let err = f.workflow.submit(&FakeScheduler::new()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Expand(_)), "{:?}", err);
}

#[test]
fn from_config_rejects_incomplete_workflow() {
    let text = r#"
[workflow]
working_directory = "/work"

[fetch]
data_dir = "/data"
sample_rate = 4096
strain_channel = "H1:GDS-CALIB_STRAIN"
"#;
    let config = SegflowConfig::parse(text).unwrap();
    let range = TimeRange::new(0.0, 100.0).unwrap();
    let result = Workflow::from_config(&config, range, FakeSegmentSource::new(), FakeAuthenticator::new());
    assert!(matches!(result, Err(ConfigError::Missing("workflow.accounting_user"))));
}
