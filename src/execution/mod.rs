//! Task execution pipeline: build arguments, run the tool, harvest output.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;

use crate::args::{self, ParameterSet};
use crate::device::DeviceProbe;
use crate::metrics;
use crate::outputs::{artifacts, results};
use crate::process;

/// Unified record returned for any task invocation. Built fresh per call
/// and immutable once returned; `success` always mirrors `return_code == 0`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExecutionResult {
    pub command: String,
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub metrics: Map<String, Value>,
    pub artifacts: Vec<String>,
    pub success: bool,
}

/// Runs one task at a time against the external tool.
///
/// Concurrent executions are independent processes sharing only the
/// filesystem: two requests writing the same project/name can observe each
/// other's files. Callers wanting isolation must supply distinct output
/// locations.
pub struct Executor {
    bin: String,
    limit: Duration,
    probe: Arc<dyn DeviceProbe>,
    output_base: PathBuf,
}

impl Executor {
    pub fn new(bin: impl Into<String>, limit: Duration, probe: Arc<dyn DeviceProbe>) -> Self {
        Self {
            bin: bin.into(),
            limit,
            probe,
            output_base: PathBuf::from("."),
        }
    }

    /// Redirect the output sweep away from the working directory. Used by
    /// tests; the service always harvests relative to where it runs.
    pub fn with_output_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.output_base = base.into();
        self
    }

    /// Run `<bin> <task> <args...>` and reduce everything it printed or wrote
    /// to disk into one result record.
    ///
    /// A failed or timed-out process does not short-circuit the pipeline:
    /// whatever output was captured is still scanned and whatever files
    /// exist are still collected, since partial results are useful for
    /// diagnostics. Failure reaches the caller only through `return_code`
    /// and `success`.
    pub async fn execute(&self, task: &str, params: ParameterSet) -> ExecutionResult {
        let mut full_args = vec![task.to_string()];
        full_args.extend(args::translate(params, self.probe.as_ref()));
        let command = format!("{} {}", self.bin, full_args.join(" "));
        info!(%command, "running task");

        let output = process::run(&self.bin, &full_args, self.limit).await;

        let mut metrics = metrics::extract(&output.stdout, &output.stderr);
        for (key, value) in results::collect(&self.output_base) {
            metrics.insert(key, value);
        }
        let artifacts = artifacts::scan(&self.output_base);
        info!(
            task,
            code = output.return_code,
            metrics = metrics.len(),
            artifacts = artifacts.len(),
            "task finished"
        );

        let success = output.success();
        ExecutionResult {
            command,
            return_code: output.return_code,
            stdout: output.stdout,
            stderr: output.stderr,
            metrics,
            artifacts,
            success,
        }
    }
}
