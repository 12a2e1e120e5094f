//! Core sandbox executor implementation

use std::time::Duration;

use super::types::{ExecutionOutcome, ExecutionReason};
use crate::sandbox::{SandboxConfig, SandboxError};

/// Runs untrusted code in isolated child processes
///
/// The executor is stateless between calls; executing the same code twice
/// yields the same outcome.
#[derive(Debug, Clone, Default)]
pub struct SandboxExecutor {
    config: SandboxConfig,
}

impl SandboxExecutor {
    /// Create an executor for the given runtime and limits
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Run `code` and wait at most `timeout` for it.
    ///
    /// Errors are reserved for the sandbox's own failures (temp directory,
    /// pipe, spawn). Anything the code does wrong comes back as a failed
    /// [`ExecutionOutcome`].
    #[cfg(unix)]
    pub async fn execute(
        &self,
        code: &str,
        timeout: Duration,
    ) -> Result<ExecutionOutcome, SandboxError> {
        unix::execute(&self.config, code, timeout).await
    }

    /// Run `code` and wait at most `timeout` for it.
    #[cfg(not(unix))]
    pub async fn execute(
        &self,
        _code: &str,
        _timeout: Duration,
    ) -> Result<ExecutionOutcome, SandboxError> {
        Err(SandboxError::Unsupported)
    }
}

#[cfg(unix)]
mod unix {
    use std::process::Stdio;
    use std::time::{Duration, Instant};

    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;
    use tokio::io::{AsyncRead, AsyncReadExt};
    use tokio::time::timeout;

    use super::super::channel::ResultChannel;
    use super::super::limits::install_child_setup;
    use super::super::runtime::command_for;
    use super::{ExecutionOutcome, ExecutionReason};
    use crate::sandbox::{SandboxConfig, SandboxError};

    const CHILD_PATH: &str = "/usr/bin:/bin";

    /// Grace period for collecting stderr after the child is gone
    const STDERR_GRACE: Duration = Duration::from_secs(1);

    pub(super) async fn execute(
        config: &SandboxConfig,
        code: &str,
        deadline: Duration,
    ) -> Result<ExecutionOutcome, SandboxError> {
        let start = Instant::now();

        let workdir = tempfile::Builder::new()
            .prefix("llmbench-sandbox-")
            .tempdir()
            .map_err(|e| SandboxError::InitializationFailed(format!("temp dir: {}", e)))?;
        let code_path = workdir.path().join(config.runtime.file_name());
        tokio::fs::write(&code_path, code)
            .await
            .map_err(|e| SandboxError::InitializationFailed(format!("code file: {}", e)))?;

        let mut channel = ResultChannel::open()
            .map_err(|e| SandboxError::InitializationFailed(format!("result pipe: {}", e)))?;
        let result_fd = channel
            .write_fd()
            .ok_or_else(|| SandboxError::Internal("result pipe already closed".to_string()))?;

        let mut cmd = command_for(&config.runtime, &code_path)?;
        cmd.current_dir(workdir.path())
            .env_clear()
            .env("PATH", CHILD_PATH)
            .env("HOME", workdir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        install_child_setup(&mut cmd, &config.limits, result_fd);

        let spawned = cmd.spawn();
        // The child holds its own copy now; ours must go so EOF is observable
        channel.close_write();
        let mut child = spawned.map_err(|e| SandboxError::SpawnFailed(e.to_string()))?;

        let pid = child
            .id()
            .and_then(|id| i32::try_from(id).ok())
            .map(Pid::from_raw);

        let max_stderr = config.limits.max_output_bytes.unwrap_or(u64::MAX);
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(read_limited(stderr, max_stderr)));

        let waited = timeout(deadline, child.wait()).await;

        // Reap stragglers in the group either way; the group may already be empty
        if let Some(pid) = pid {
            kill_group(pid);
        }

        let outcome = match waited {
            Ok(Ok(status)) => match status.code() {
                Some(0) => {
                    let reported = channel.read_verdict().map_err(|e| {
                        SandboxError::Internal(format!("reading result pipe: {}", e))
                    })?;
                    if reported {
                        ExecutionOutcome::passed()
                    } else {
                        ExecutionOutcome::failed(ExecutionReason::RuntimeFailure)
                    }
                }
                code => ExecutionOutcome::failed(ExecutionReason::NonZeroExit(code)),
            },
            Ok(Err(e)) => {
                return Err(SandboxError::Internal(format!("Process wait failed: {}", e)));
            }
            Err(_) => {
                let _ = child.kill().await;
                ExecutionOutcome::failed(ExecutionReason::Timeout)
            }
        };

        if let Some(task) = stderr_task {
            if let Ok(Ok(stderr)) = timeout(STDERR_GRACE, task).await {
                if !stderr.is_empty() {
                    tracing::debug!(stderr = %stderr, "sandboxed process stderr");
                }
            }
        }

        tracing::debug!(
            passed = outcome.passed,
            reason = %outcome.reason,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "sandbox execution finished"
        );

        Ok(outcome)
    }

    fn kill_group(pid: Pid) {
        match killpg(pid, Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => tracing::debug!(error = %e, "failed to kill sandbox process group"),
        }
    }

    /// Read up to `max_bytes`, then keep draining so the child never blocks
    async fn read_limited<R: AsyncRead + Unpin>(mut reader: R, max_bytes: u64) -> String {
        let mut kept = Vec::new();
        let mut buf = [0u8; 4096];
        let mut truncated = false;

        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    let room = max_bytes.saturating_sub(kept.len() as u64) as usize;
                    let take = n.min(room);
                    kept.extend_from_slice(&buf[..take]);
                    truncated |= take < n;
                }
            }
        }

        let mut output = String::from_utf8_lossy(&kept).into_owned();
        if truncated {
            output.push_str("\n... (output truncated due to size limit)");
        }
        output
    }
}
