//! End-to-end pipeline tests against a stand-in tool binary.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map, Value};
use ultrad::args::ParameterSet;
use ultrad::device::DeviceProbe;
use ultrad::execution::Executor;

struct CpuProbe;
impl DeviceProbe for CpuProbe {
    fn accelerator_available(&self) -> bool {
        false
    }
}

fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-yolo");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn params(pairs: &[(&str, Value)]) -> ParameterSet {
    let map: Map<String, Value> = pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    ParameterSet::new(map)
}

fn executor(tool: &Path, base: &Path) -> Executor {
    Executor::new(
        tool.to_string_lossy().into_owned(),
        Duration::from_secs(30),
        Arc::new(CpuProbe),
    )
    .with_output_base(base)
}

#[tokio::test]
async fn test_successful_run_extracts_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "echo 'mAP50: 0.87'");
    let exec = executor(&tool, dir.path());

    let result = exec
        .execute("val", params(&[("model", json!("m.pt")), ("device", json!("cpu"))]))
        .await;

    assert!(result.success);
    assert_eq!(result.return_code, 0);
    assert_eq!(result.metrics["mAP50"], 0.87);
    assert!(result.command.ends_with("val --model m.pt --device cpu"));
    assert!(result.artifacts.is_empty());
}

#[tokio::test]
async fn test_missing_device_is_resolved_before_launch() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "true");
    let exec = executor(&tool, dir.path());

    let result = exec.execute("predict", params(&[("model", json!("m.pt"))])).await;

    assert!(result.command.contains("--device cpu"));
}

#[tokio::test]
async fn test_failed_run_still_harvests_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let run_dir = dir.path().join("runs/val/exp");
    fs::create_dir_all(&run_dir).unwrap();
    fs::write(run_dir.join("results.json"), r#"{"precision": 0.9}"#).unwrap();

    let tool = fake_tool(dir.path(), "echo 'box_loss: 0.5'; exit 2");
    let exec = executor(&tool, dir.path());

    let result = exec.execute("val", params(&[("device", json!("cpu"))])).await;

    assert!(!result.success);
    assert_eq!(result.return_code, 2);
    // Partial results survive the failure for diagnostics.
    assert_eq!(result.metrics["box_loss"], 0.5);
    assert_eq!(result.metrics["file_results"], json!({"precision": 0.9}));
    assert_eq!(result.artifacts, vec!["runs/val/exp/results.json"]);
}

#[tokio::test]
async fn test_timed_out_run_reports_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "sleep 5");
    let exec = Executor::new(
        tool.to_string_lossy().into_owned(),
        Duration::from_millis(200),
        Arc::new(CpuProbe),
    )
    .with_output_base(dir.path());

    let result = exec.execute("train", params(&[("device", json!("cpu"))])).await;

    assert!(!result.success);
    assert_eq!(result.return_code, -1);
    assert!(result.stderr.contains("timed out"));
}
