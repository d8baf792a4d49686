// src/exec/mod.rs

//! Process execution layer.
//!
//! This module turns build steps into running processes:
//!
//! - [`argument`] collapses `--option value` arguments into one token.
//! - [`spec`] holds the OS-independent [`ExecutableSpec`] and its builder.
//! - [`invocation`] shapes a spec for the host OS family.
//! - [`drain`] reads one output stream with an optional bound.
//! - [`runner`] spawns a process, drains its streams and classifies the exit
//!   code.
//! - [`backend`] provides the `ProcessBackend` trait and the real
//!   implementation; tests can replace it with a fake.
//! - [`orchestrator`] runs a list of steps in order and fails fast.

pub mod argument;
pub mod backend;
pub mod drain;
pub mod invocation;
pub mod orchestrator;
pub mod runner;
pub mod spec;

pub use argument::normalize_argument;
pub use backend::{ProcessBackend, RealProcessBackend};
pub use invocation::{Invocation, InvocationBuilder};
pub use orchestrator::{Orchestrator, PlannedStep, SequenceState, StepReport};
pub use runner::{ExecutionResult, ProcessRunner, RunOptions};
pub use spec::{ExecutableSpec, ExecutableSpecBuilder};
