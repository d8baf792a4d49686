// src/exec/orchestrator.rs

//! Strictly sequential execution of a build step's executables.
//!
//! Each planned executable is shaped for the host by the
//! [`InvocationBuilder`] and handed to a [`ProcessBackend`]. The first
//! failure (spawn error or exit code outside the executable's success
//! policy) stops the sequence. Executables that already ran are not rolled
//! back.

use std::fmt;

use tracing::{error, info};

use crate::errors::{FrontendExecError, Result};
use crate::exec::backend::ProcessBackend;
use crate::exec::invocation::InvocationBuilder;
use crate::exec::runner::{ExecutionResult, RunOptions};
use crate::exec::spec::ExecutableSpec;

/// One executable in a sequence, with its output handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// Name used in logs (typically the configured step name).
    pub name: String,
    pub spec: ExecutableSpec,
    pub options: RunOptions,
}

impl PlannedStep {
    pub fn new(name: impl Into<String>, spec: ExecutableSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }
}

/// Where a sequence is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Pending,
    /// Step `i` (zero-based) is executing.
    Running(usize),
    Completed,
    /// Step `i` failed; the sequence stopped there.
    Failed(usize),
}

impl SequenceState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SequenceState::Completed | SequenceState::Failed(_))
    }
}

/// Result of one successfully executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: String,
    pub result: ExecutionResult,
}

/// Runs planned steps in order through a backend.
pub struct Orchestrator<B: ProcessBackend> {
    invocations: InvocationBuilder,
    backend: B,
    state: SequenceState,
}

impl<B: ProcessBackend> fmt::Debug for Orchestrator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("invocations", &self.invocations)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<B: ProcessBackend> Orchestrator<B> {
    pub fn new(invocations: InvocationBuilder, backend: B) -> Self {
        Self {
            invocations,
            backend,
            state: SequenceState::Pending,
        }
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Execute `steps` strictly in order, stopping at the first failure.
    ///
    /// Every call starts a fresh sequence. On success, returns one report
    /// per step in input order.
    pub async fn run(&mut self, steps: &[PlannedStep]) -> Result<Vec<StepReport>> {
        self.state = SequenceState::Pending;
        info!(
            steps = steps.len(),
            os_family = %self.invocations.os_family(),
            working_dir = ?self.invocations.working_directory(),
            "starting step sequence"
        );

        let mut reports = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            self.state = SequenceState::Running(index);
            let invocation = self.invocations.build(&step.spec);
            info!(step = %step.name, index, command = %invocation, "running step");

            let result = match self.backend.execute(invocation, step.options).await {
                Ok(result) => result,
                Err(err) => {
                    self.state = SequenceState::Failed(index);
                    error!(step = %step.name, index, error = %err, "step could not be executed");
                    return Err(err);
                }
            };

            if !result.succeeded {
                self.state = SequenceState::Failed(index);
                error!(
                    step = %step.name,
                    index,
                    exit_code = result.exit_code,
                    stderr = %result.stderr,
                    "step failed; aborting remaining steps"
                );
                return Err(FrontendExecError::NonZeroExit {
                    exit_code: result.exit_code,
                    stdout: result.stdout,
                    stderr: result.stderr,
                });
            }

            reports.push(StepReport {
                name: step.name.clone(),
                result,
            });
        }

        self.state = SequenceState::Completed;
        info!(steps = reports.len(), "step sequence completed");
        Ok(reports)
    }
}
