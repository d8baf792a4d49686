use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use frontend_exec::errors::{FrontendExecError, Result};
use frontend_exec::exec::{ExecutionResult, Invocation, ProcessBackend, RunOptions};

/// What the fake should pretend happened for one executable.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// Behave as if the OS could not spawn the program.
    SpawnError,
}

impl FakeOutcome {
    pub fn exit(code: i32) -> Self {
        FakeOutcome::Exit {
            code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn output(code: i32, stdout: &str, stderr: &str) -> Self {
        FakeOutcome::Exit {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }
}

/// A fake backend that:
/// - records every invocation it is asked to run
/// - answers with a scripted outcome per executable (exit 0 by default),
///   classified against the invocation's success policy.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    outcomes: HashMap<String, FakeOutcome>,
    executed: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeBackend {
    pub fn new(executed: Arc<Mutex<Vec<Invocation>>>) -> Self {
        Self {
            outcomes: HashMap::new(),
            executed,
        }
    }

    /// Script the outcome for invocations of `executable` (the configured
    /// name, not the OS wrapper).
    pub fn with_outcome(mut self, executable: &str, outcome: FakeOutcome) -> Self {
        self.outcomes.insert(executable.to_string(), outcome);
        self
    }

    /// Executable names run so far, in order.
    pub fn executed_names(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(|inv| inv.executable.clone())
            .collect()
    }
}

impl ProcessBackend for FakeBackend {
    fn execute(
        &mut self,
        invocation: Invocation,
        _options: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        let outcome = self
            .outcomes
            .get(&invocation.executable)
            .cloned()
            .unwrap_or_else(|| FakeOutcome::exit(0));
        let executed = Arc::clone(&self.executed);

        Box::pin(async move {
            executed.lock().unwrap().push(invocation.clone());

            match outcome {
                FakeOutcome::SpawnError => Err(FrontendExecError::SpawnFailure {
                    program: invocation.program.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "fake: program not found"),
                }),
                FakeOutcome::Exit {
                    code,
                    stdout,
                    stderr,
                } => Ok(ExecutionResult {
                    exit_code: code,
                    stdout,
                    stderr,
                    succeeded: invocation.success_policy.is_success(code),
                    stdout_timed_out: false,
                    stderr_timed_out: false,
                }),
            }
        })
    }
}
