// src/types.rs

//! Small value types shared by the config and exec layers.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{FrontendExecError, Result};

/// Host operating system family, as far as process invocation cares.
///
/// Computed once from the raw OS name (e.g. `"Linux"`, `"Windows 10"`) and
/// then passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Direct `exec`-style invocation.
    Posix,
    /// Invocation wrapped through `cmd /C`.
    Windows,
}

const WINDOWS_OS_FAMILY: &str = "windows";

impl OsFamily {
    /// Classify a raw OS name.
    ///
    /// Anything containing `windows` (case-insensitive) is Windows-family,
    /// everything else is POSIX-family. A missing or blank name is a
    /// configuration error.
    pub fn from_os_name(os_name: Option<&str>) -> Result<Self> {
        let name = os_name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(FrontendExecError::ConfigError(
                "OS name is not set; cannot decide how to invoke executables".to_string(),
            ));
        }

        if name.to_lowercase().contains(WINDOWS_OS_FAMILY) {
            Ok(OsFamily::Windows)
        } else {
            Ok(OsFamily::Posix)
        }
    }

    /// Family of the host this binary was built for.
    pub fn detect() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Posix => f.write_str("posix"),
            OsFamily::Windows => f.write_str("windows"),
        }
    }
}

/// Which exit codes count as success for one executable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Only `0` is success.
    #[default]
    Default,
    /// Exactly the listed codes are success.
    Custom(BTreeSet<i32>),
}

impl SuccessPolicy {
    /// Grunt signals task failures with 3 and 6; tolerate those but keep
    /// fatal errors fatal.
    pub fn ignore_task_errors() -> Self {
        SuccessPolicy::Custom([0, 3, 6].into_iter().collect())
    }

    /// Every exit code grunt documents (0 through 6).
    pub fn ignore_all_errors() -> Self {
        SuccessPolicy::Custom((0..=6).collect())
    }

    /// `None` keeps the default policy; `Some(codes)` is used verbatim.
    pub fn from_codes(codes: Option<Vec<i32>>) -> Self {
        match codes {
            Some(codes) => SuccessPolicy::Custom(codes.into_iter().collect()),
            None => SuccessPolicy::Default,
        }
    }

    pub fn is_success(&self, exit_code: i32) -> bool {
        match self {
            SuccessPolicy::Default => exit_code == 0,
            SuccessPolicy::Custom(codes) => codes.contains(&exit_code),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, SuccessPolicy::Default)
    }
}

/// Bound on how long a single output stream is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamTimeout {
    /// Block until the stream reaches end-of-file.
    #[default]
    Unbounded,
    /// Give up once no data has been available past this duration.
    After(Duration),
}

impl StreamTimeout {
    /// `<= 0` means unbounded.
    pub fn from_millis(millis: i64) -> Self {
        if millis <= 0 {
            StreamTimeout::Unbounded
        } else {
            StreamTimeout::After(Duration::from_millis(millis as u64))
        }
    }
}

/// Kind of front-end tool a build step drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Npm,
    Bower,
    Grunt,
    /// Arbitrary executable with explicit arguments.
    Exec,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::Npm => "npm",
            StepKind::Bower => "bower",
            StepKind::Grunt => "grunt",
            StepKind::Exec => "exec",
        };
        f.write_str(s)
    }
}
