// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use sf_core::{BranchMap, ChunkTable};
use sf_engine::{artifact_complete, DispatchReport, GateState};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct RowView {
    index: usize,
    start: f64,
    end: f64,
    duration: f64,
}

/// Print a chunk table and where it lives.
pub fn print_table(table: &ChunkTable, path: &Path, reused: bool, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let verb = if reused { "Reused" } else { "Wrote" };
            println!(
                "{} {} segment(s), {}s total, to {}",
                verb,
                table.len(),
                table.total_duration(),
                path.display()
            );
            for row in table.iter() {
                println!("{:>4}  {:>14}  {:>14}  {:>10}", row.index, row.start, row.end(), row.duration);
            }
        }
        OutputFormat::Json => {
            let rows: Vec<RowView> = table
                .iter()
                .map(|r| RowView { index: r.index, start: r.start, end: r.end(), duration: r.duration })
                .collect();
            let obj = serde_json::json!({
                "path": path,
                "reused": reused,
                "livetime": table.total_duration(),
                "segments": rows,
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct BranchView<'a> {
    index: usize,
    start: f64,
    end: f64,
    artifact: &'a str,
    complete: bool,
}

/// Branch listing with per-branch artifact status.
pub fn format_branches(state: GateState, map: &BranchMap, data_dir: &Path, ext: &str) -> Vec<String> {
    if state == GateState::Pending {
        return vec!["Segment table not written yet (pending)".to_string()];
    }
    let mut lines = vec![format!("{} branch(es)", map.len())];
    for branch in map.iter() {
        let name = branch.artifact_name(ext);
        let status = if artifact_complete(&data_dir.join(&name)) { "done" } else { "pending" };
        lines.push(format!("{:>4}  {:>14}  {:>14}  {:<8} {}", branch.index, branch.start, branch.end(), status, name));
    }
    lines
}

pub fn print_branches(
    state: GateState,
    map: &BranchMap,
    data_dir: &Path,
    ext: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for line in format_branches(state, map, data_dir, ext) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let names: Vec<String> = map.iter().map(|b| b.artifact_name(ext)).collect();
            let branches: Vec<BranchView<'_>> = map
                .iter()
                .zip(&names)
                .map(|(b, name)| BranchView {
                    index: b.index,
                    start: b.start,
                    end: b.end(),
                    artifact: name,
                    complete: artifact_complete(&data_dir.join(name)),
                })
                .collect();
            let obj = serde_json::json!({ "state": state, "branches": branches });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}

/// One-line summary of a dispatch pass.
pub fn format_report(report: &DispatchReport) -> String {
    if report.gate == GateState::Pending {
        return "Segment table not written yet; nothing submitted".to_string();
    }
    match report.cluster {
        Some(cluster) => format!(
            "Submitted {} job(s) to cluster {}, {} already complete",
            report.submitted.len(),
            cluster,
            report.skipped.len()
        ),
        None => format!("All {} branch(es) complete; nothing submitted", report.skipped.len()),
    }
}

pub fn print_report(report: &DispatchReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_report(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
