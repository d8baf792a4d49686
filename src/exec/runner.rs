// src/exec/runner.rs

//! Single-process runner.
//!
//! Spawns one [`Invocation`], optionally drains stdout/stderr concurrently
//! (each with its own bound), waits for the child to exit and classifies the
//! exit code against the invocation's [`SuccessPolicy`].
//!
//! The wait for termination itself is unbounded; stream bounds only limit
//! how long we keep reading. A child that outlives its drain deadline keeps
//! running in the background.
//!
//! [`SuccessPolicy`]: crate::types::SuccessPolicy

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{FrontendExecError, Result};
use crate::exec::drain::{drain_stream, DrainedStream};
use crate::exec::invocation::Invocation;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::StreamTimeout;

/// Per-run output handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Pipe and collect stdout/stderr. When false the child inherits our
    /// streams and nothing is captured.
    pub capture_output: bool,
    pub stdout_timeout: StreamTimeout,
    pub stderr_timeout: StreamTimeout,
}

impl RunOptions {
    /// Capture both streams with the given bounds.
    pub fn captured(stdout_timeout: StreamTimeout, stderr_timeout: StreamTimeout) -> Self {
        Self {
            capture_output: true,
            stdout_timeout,
            stderr_timeout,
        }
    }
}

/// Outcome of one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    /// Trimmed captured stdout (empty when not captured).
    pub stdout: String,
    /// Trimmed captured stderr (empty when not captured).
    pub stderr: String,
    /// `exit_code` is in the invocation's success policy.
    pub succeeded: bool,
    pub stdout_timed_out: bool,
    pub stderr_timed_out: bool,
}

impl ExecutionResult {
    /// Trimmed stdout on success, `NonZeroExit` otherwise.
    pub fn into_output(self) -> Result<String> {
        if self.succeeded {
            Ok(self.stdout)
        } else {
            Err(FrontendExecError::NonZeroExit {
                exit_code: self.exit_code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// Spawns and supervises child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    fs: Arc<dyn FileSystem>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Arc::new(RealFileSystem))
    }
}

impl ProcessRunner {
    /// `fs` decides whether the invocation's working directory exists.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Run the invocation and return trimmed stdout, or `NonZeroExit` if the
    /// exit code is outside the success policy.
    pub async fn run(&self, invocation: &Invocation, options: RunOptions) -> Result<String> {
        self.execute(invocation, options).await?.into_output()
    }

    /// Run the invocation and return its classified result without turning
    /// a failing exit code into an error.
    ///
    /// Errors only when the process cannot be spawned or waited on.
    pub async fn execute(
        &self,
        invocation: &Invocation,
        options: RunOptions,
    ) -> Result<ExecutionResult> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if self.fs.is_dir(&invocation.working_directory) {
            cmd.current_dir(&invocation.working_directory);
        } else {
            debug!(
                dir = ?invocation.working_directory,
                "working directory does not exist; spawning in current directory"
            );
        }

        if let Some(env) = &invocation.environment {
            cmd.envs(env);
        }

        if options.capture_output {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        } else {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }

        info!(executable = %invocation.executable, command = %invocation, "starting process");

        let mut child = cmd.spawn().map_err(|source| FrontendExecError::SpawnFailure {
            program: invocation.program.clone(),
            source,
        })?;

        // Start draining before waiting so a full pipe can't stall the child.
        let stdout_task = child.stdout.take().map(|stdout| {
            let label = format!("{} stdout", invocation.executable);
            let timeout = options.stdout_timeout;
            tokio::spawn(async move { drain_stream(stdout, timeout, &label).await })
        });
        let stderr_task = child.stderr.take().map(|stderr| {
            let label = format!("{} stderr", invocation.executable);
            let timeout = options.stderr_timeout;
            tokio::spawn(async move { drain_stream(stderr, timeout, &label).await })
        });

        let status = child.wait().await?;
        let stdout = join_drain(stdout_task).await?;
        let stderr = join_drain(stderr_task).await?;

        if !stdout.text.is_empty() {
            debug!(executable = %invocation.executable, "stdout: \n{}", stdout.text);
        }
        if !stderr.text.is_empty() {
            warn!(executable = %invocation.executable, "stderr: \n{}", stderr.text);
        }

        let exit_code = exit_code_of(status, &invocation.executable);
        let succeeded = invocation.success_policy.is_success(exit_code);

        if succeeded {
            info!(executable = %invocation.executable, exit_code, "process exited");
        } else {
            warn!(
                executable = %invocation.executable,
                exit_code,
                "process exited with a non-success code"
            );
        }

        Ok(ExecutionResult {
            exit_code,
            stdout: stdout.text,
            stderr: stderr.text,
            succeeded,
            stdout_timed_out: stdout.timed_out,
            stderr_timed_out: stderr.timed_out,
        })
    }
}

/// Exit code of a finished child; `-1` when it has none (killed by a
/// signal on unix).
fn exit_code_of(status: ExitStatus, executable: &str) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        warn!(
            executable,
            signal = ?status.signal(),
            "process terminated by signal; reporting exit code -1"
        );
    }
    #[cfg(not(unix))]
    warn!(executable, "process terminated without an exit code; reporting -1");

    -1
}

async fn join_drain(task: Option<JoinHandle<DrainedStream>>) -> Result<DrainedStream> {
    match task {
        Some(handle) => Ok(handle.await.map_err(anyhow::Error::from)?),
        None => Ok(DrainedStream::default()),
    }
}
