// src/steps/version.rs

//! `--version` probing for configured tools.

use tracing::warn;

use crate::config::model::StepConfig;
use crate::exec::{ExecutableSpec, ExecutionResult, InvocationBuilder, ProcessBackend, RunOptions};
use crate::steps::{executable_name, grunt};
use crate::types::{StepKind, StreamTimeout};

pub const VERSION_FLAG: &str = "--version";

/// `--version` output normally arrives immediately; don't wait on a tool
/// that keeps stdout open.
pub const VERSION_STDOUT_TIMEOUT_MS: i64 = 1000;

/// Spec used to ask a step's tool for its version.
pub fn version_spec(step: &StepConfig) -> ExecutableSpec {
    match step.kind {
        StepKind::Grunt => grunt::grunt_version_spec(step, VERSION_FLAG),
        _ => ExecutableSpec::builder(executable_name(step))
            .arg(VERSION_FLAG)
            .envs(&step.env)
            .build(),
    }
}

pub fn version_run_options() -> RunOptions {
    RunOptions::captured(
        StreamTimeout::from_millis(VERSION_STDOUT_TIMEOUT_MS),
        StreamTimeout::Unbounded,
    )
}

/// Run the step's tool with `--version`.
///
/// Returns `None` (after logging a warning) if the tool can't be run, fails,
/// or prints something that doesn't look like a version.
pub async fn probe_version<B: ProcessBackend>(
    backend: &mut B,
    invocations: &InvocationBuilder,
    step: &StepConfig,
) -> Option<String> {
    let spec = version_spec(step);
    let invocation = invocations.build(&spec);

    let output = match backend
        .execute(invocation, version_run_options())
        .await
        .and_then(ExecutionResult::into_output)
    {
        Ok(output) => output,
        Err(e) => {
            warn!(step = %step.name, executable = %spec.name(), error = %e, "failed to determine version");
            return None;
        }
    };

    let version = match step.kind {
        StepKind::Grunt => grunt::parse_grunt_version(&output),
        _ => output
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string),
    };

    if version.is_none() {
        warn!(
            step = %step.name,
            executable = %spec.name(),
            output = %output,
            "failed to determine version from output"
        );
    }

    version
}
