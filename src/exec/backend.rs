// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The orchestrator talks to a `ProcessBackend` instead of spawning
//! processes itself, so tests can swap in a scripted fake while production
//! goes through [`ProcessRunner`].

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::invocation::Invocation;
use crate::exec::runner::{ExecutionResult, ProcessRunner, RunOptions};

/// Trait abstracting how one invocation is executed.
pub trait ProcessBackend: Send {
    /// Run the invocation to completion.
    ///
    /// Implementations return `Ok` with a classified result for any process
    /// that ran (regardless of exit code), and `Err` when it could not be
    /// spawned at all.
    fn execute(
        &mut self,
        invocation: Invocation,
        options: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>>;
}

/// Backend that spawns real OS processes.
#[derive(Debug, Clone, Default)]
pub struct RealProcessBackend {
    runner: ProcessRunner,
}

impl RealProcessBackend {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

impl ProcessBackend for RealProcessBackend {
    fn execute(
        &mut self,
        invocation: Invocation,
        options: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        Box::pin(async move { self.runner.execute(&invocation, options).await })
    }
}
