// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sf_adapters::FakeScheduler;
use sf_core::test_support::branch;
use sf_core::ResourceSize;

fn dispatcher() -> JobDispatcher {
    let mut config = WorkflowConfig::new("/work", "albert.einstein", "ligo.dev.o4.detchar");
    config.name = "deepclean".to_string();
    config.memory_request = ResourceSize::gigabytes(4);
    JobDispatcher::new(config, FetchCommand::new("sf-fetch", "/data"))
}

fn three_branches() -> BranchMap {
    [branch(1, 10.0, 30.0), branch(2, 40.0, 30.0), branch(3, 70.0, 20.0)].into_iter().collect()
}

#[test]
fn record_carries_scheduler_keys() {
    let record = dispatcher().record(&branch(2, 40.0, 30.0));
    assert_eq!(record.branch, 2);
    assert_eq!(record.get("executable"), Some("sf-fetch"));
    assert_eq!(record.get("getenv"), Some("true"));
    assert_eq!(record.get("request_memory"), Some("4 GB"));
    assert_eq!(record.get("request_disk"), Some("10 GB"));
    assert_eq!(record.get("accounting_group"), Some("ligo.dev.o4.detchar"));
    assert_eq!(record.get("accounting_group_user"), Some("albert.einstein"));
    assert_eq!(record.get("log"), Some("/work/deepclean-$(Cluster).log"));
    assert_eq!(record.get("output"), Some("/work/deepclean-$(Cluster).out"));
    assert_eq!(record.get("error"), Some("/work/deepclean-$(Cluster).err"));
}

#[test]
fn record_arguments_describe_branch_window() {
    let record = dispatcher().record(&branch(2, 40.0, 30.0));
    let arguments = record.get("arguments").unwrap();
    assert!(arguments.starts_with("\"fetch --start 40 --end 70 "), "{}", arguments);
    assert!(arguments.contains("--output-directory /data"), "{}", arguments);
}

#[test]
fn build_appends_one_record_per_branch() {
    let map = three_branches();
    let submit = dispatcher().build(map.iter());
    assert_eq!(submit.name(), "deepclean");
    let branches: Vec<usize> = submit.records().iter().map(|r| r.branch).collect();
    assert_eq!(branches, vec![1, 2, 3]);
    assert_eq!(submit.render().matches("queue\n").count(), 3);
}

#[tokio::test]
async fn dispatch_submits_every_pending_branch() {
    let data = tempfile::tempdir().unwrap();
    let sink = FakeScheduler::new();

    let report = dispatcher().dispatch(&sink, &three_branches(), data.path(), "hdf5").await.unwrap();
    assert_eq!(report.gate, GateState::Expanded);
    assert_eq!(report.submitted, vec![1, 2, 3]);
    assert!(report.skipped.is_empty());
    assert_eq!(report.cluster, Some(100));
    assert_eq!(sink.submissions().len(), 1);
}

#[tokio::test]
async fn dispatch_skips_completed_artifacts() {
    let data = tempfile::tempdir().unwrap();
    std::fs::write(data.path().join("deepclean-40-30.hdf5"), b"data").unwrap();
    // Zero-length artifacts are partial writes and get resubmitted.
    std::fs::write(data.path().join("deepclean-70-20.hdf5"), b"").unwrap();
    let sink = FakeScheduler::new();

    let report = dispatcher().dispatch(&sink, &three_branches(), data.path(), "hdf5").await.unwrap();
    assert_eq!(report.submitted, vec![1, 3]);
    assert_eq!(report.skipped, vec![2]);

    let submitted: Vec<usize> = sink.submissions()[0].records().iter().map(|r| r.branch).collect();
    assert_eq!(submitted, vec![1, 3]);
}

#[tokio::test]
async fn dispatch_with_everything_complete_submits_nothing() {
    let data = tempfile::tempdir().unwrap();
    for name in ["deepclean-10-30.hdf5", "deepclean-40-30.hdf5", "deepclean-70-20.hdf5"] {
        std::fs::write(data.path().join(name), b"data").unwrap();
    }
    let sink = FakeScheduler::new();

    let report = dispatcher().dispatch(&sink, &three_branches(), data.path(), "hdf5").await.unwrap();
    assert!(report.submitted.is_empty());
    assert_eq!(report.cluster, None);
    assert!(sink.submissions().is_empty());
}

#[tokio::test]
async fn dispatch_propagates_scheduler_failure() {
    let data = tempfile::tempdir().unwrap();
    let sink = FakeScheduler::new();
    sink.fail_with("schedd unreachable");

    let err = dispatcher().dispatch(&sink, &three_branches(), data.path(), "hdf5").await.unwrap_err();
    assert!(err.to_string().contains("schedd unreachable"), "{}", err);
}

#[test]
fn pending_report_is_empty() {
    let report = DispatchReport::pending();
    assert_eq!(report.gate, GateState::Pending);
    assert!(report.submitted.is_empty());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["gate"], "pending");
    assert!(json.get("cluster").is_none());
}
