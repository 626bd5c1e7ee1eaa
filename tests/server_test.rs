//! HTTP surface tests against a server bound to an ephemeral port.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use ultrad::device::DeviceProbe;
use ultrad::execution::Executor;
use ultrad::server::{router, AppState};

struct CpuProbe;
impl DeviceProbe for CpuProbe {
    fn accelerator_available(&self) -> bool {
        false
    }
}

async fn spawn_server(executor: Executor) -> String {
    let state = Arc::new(AppState { executor });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fake_tool(dir: &Path, body: &str) -> String {
    let path = dir.join("fake-yolo");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tool = fake_tool(dir.path(), "true");
    let base = spawn_server(Executor::new(tool, Duration::from_secs(5), Arc::new(CpuProbe))).await;

    let resp = reqwest::get(&base).await?;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_val_endpoint_returns_operation_record() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tool = fake_tool(dir.path(), "echo 'mAP50: 0.87'");
    let exec = Executor::new(tool, Duration::from_secs(30), Arc::new(CpuProbe))
        .with_output_base(dir.path());
    let base = spawn_server(exec).await;

    let payload = json!({"model": "m.pt", "data": "coco128.yaml", "device": "cpu"});
    let resp = reqwest::Client::new()
        .post(format!("{}/val", base))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["return_code"], 0);
    assert_eq!(body["metrics"]["mAP50"], 0.87);
    assert!(!body["run_id"].as_str().unwrap().is_empty());
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_task_failure_still_returns_200() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tool = fake_tool(dir.path(), "echo 'boom' 1>&2; exit 1");
    let exec = Executor::new(tool, Duration::from_secs(30), Arc::new(CpuProbe))
        .with_output_base(dir.path());
    let base = spawn_server(exec).await;

    let payload = json!({"model": "m.pt", "source": "bus.jpg", "device": "cpu"});
    let resp = reqwest::Client::new()
        .post(format!("{}/predict", base))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["return_code"], 1);
    assert!(body["stderr"].as_str().unwrap().contains("boom"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_request_rejected_before_execution() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tool = fake_tool(dir.path(), "true");
    let base = spawn_server(Executor::new(tool, Duration::from_secs(5), Arc::new(CpuProbe))).await;

    // `data` is required for training.
    let resp = reqwest::Client::new()
        .post(format!("{}/train", base))
        .json(&json!({"model": "m.pt"}))
        .send()
        .await?;
    assert_eq!(resp.status(), 422);
    Ok(())
}
