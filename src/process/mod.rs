//! External process invocation with a bounded wait.
//!
//! Every failure mode resolves to a populated [`ProcessOutput`]; nothing in
//! here returns an error to the caller. A run that cannot produce a real
//! exit code (spawn failure, signal death, timeout) reports the sentinel
//! code `-1` with the diagnostic in `stderr`.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Default wall-clock budget for one task invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);

/// Captured outcome of one process run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.return_code == 0
    }

    fn failed(stderr: String) -> Self {
        Self { return_code: -1, stdout: String::new(), stderr }
    }
}

/// Run `program` with `args` in the current working directory, capturing
/// both streams in full. The child is killed if the budget elapses; it is
/// never left running in the background.
pub async fn run(program: &str, args: &[String], limit: Duration) -> ProcessOutput {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Dropping the wait future on timeout reaps the child.
        .kill_on_drop(true);

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!(program, error = %e, "failed to spawn");
            return ProcessOutput::failed(format!("failed to spawn {}: {}", program, e));
        }
    };

    match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(out)) => {
            let output = ProcessOutput {
                return_code: out.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            };
            debug!(program, code = output.return_code, "process finished");
            output
        }
        Ok(Err(e)) => {
            warn!(program, error = %e, "failed waiting for process");
            ProcessOutput::failed(format!("failed waiting for {}: {}", program, e))
        }
        Err(_) => {
            warn!(program, secs = limit.as_secs(), "process timed out");
            ProcessOutput::failed(format!("Command timed out after {}s", limit.as_secs()))
        }
    }
}
