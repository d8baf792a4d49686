// src/exec/invocation.rs

//! OS-shaped invocations.
//!
//! POSIX hosts exec the binary directly. Windows hosts go through the
//! command interpreter with `/C` ("run this one command, then exit"), which
//! gives uniform argument passing for `.cmd`/`.bat` shims like `npm.cmd`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::exec::spec::ExecutableSpec;
use crate::types::{OsFamily, SuccessPolicy};

/// Command interpreter used on Windows-family hosts.
pub const WINDOWS_SHELL: &str = "cmd";

/// Flag telling the Windows interpreter to run a single command and exit.
pub const WINDOWS_RUN_ONCE_FLAG: &str = "/C";

/// A concrete process invocation, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The literal executable to spawn.
    pub program: String,
    /// Arguments after any OS-specific prefix.
    pub args: Vec<String>,
    /// Directory the process should run in.
    pub working_directory: PathBuf,
    /// Environment overrides (`None` inherits the parent environment).
    pub environment: Option<BTreeMap<String, String>>,
    /// Exit codes that count as success.
    pub success_policy: SuccessPolicy,
    /// Name of the executable as configured, for logs and errors.
    pub executable: String,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Turns [`ExecutableSpec`]s into [`Invocation`]s for one host family and
/// working directory.
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
    os_family: OsFamily,
    working_directory: PathBuf,
}

impl InvocationBuilder {
    pub fn new(os_family: OsFamily, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            os_family,
            working_directory: working_directory.into(),
        }
    }

    pub fn os_family(&self) -> OsFamily {
        self.os_family
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn build(&self, spec: &ExecutableSpec) -> Invocation {
        let (program, args) = match self.os_family {
            OsFamily::Posix => (spec.name().to_string(), spec.arguments().to_vec()),
            OsFamily::Windows => {
                let mut args = Vec::with_capacity(spec.arguments().len() + 2);
                args.push(WINDOWS_RUN_ONCE_FLAG.to_string());
                args.push(spec.name().to_string());
                args.extend(spec.arguments().iter().cloned());
                (WINDOWS_SHELL.to_string(), args)
            }
        };

        Invocation {
            program,
            args,
            working_directory: self.working_directory.clone(),
            environment: spec.environment().cloned(),
            success_policy: spec.success_policy().clone(),
            executable: spec.name().to_string(),
        }
    }
}
