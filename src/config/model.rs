// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::StepKind;

/// Top-level configuration as read from a TOML file (before validation).
///
/// ```toml
/// [build]
/// working_directory = "target-grunt"
///
/// [[step]]
/// name = "deps"
/// kind = "npm"
///
/// [[step]]
/// name = "build"
/// kind = "grunt"
/// target = "dist"
/// options = ["--gruntfile Gruntfile.js"]
/// ```
///
/// Steps are an array so their order in the file is the execution order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub step: Vec<StepConfig>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so holders can rely on
/// step names being unique and per-kind fields being consistent.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub build: BuildSection,
    pub step: Vec<StepConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(build: BuildSection, step: Vec<StepConfig>) -> Self {
        Self { build, step }
    }

    pub fn step_named(&self, name: &str) -> Option<&StepConfig> {
        self.step.iter().find(|s| s.name == name)
    }

    /// Working directory for all steps; relative paths are resolved against
    /// `base` (normally the directory holding the config file).
    pub fn working_directory(&self, base: &Path) -> PathBuf {
        let dir = Path::new(&self.build.working_directory);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            base.join(dir)
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Directory every step runs in (the JS build output directory).
    #[serde(default = "default_working_directory")]
    pub working_directory: String,

    /// Host OS name, e.g. `"Linux"` or `"Windows 10"`. When unset the CLI
    /// falls back to `--os-name` and then to the host.
    #[serde(default)]
    pub os_name: Option<String>,

    /// Let tools print colors (default: ask them not to).
    #[serde(default)]
    pub show_colors: bool,

    /// Skip every step.
    #[serde(default)]
    pub disabled: bool,
}

fn default_working_directory() -> String {
    "target-grunt".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            working_directory: default_working_directory(),
            os_name: None,
            show_colors: false,
            disabled: false,
        }
    }
}

/// `[[step]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    pub name: String,

    pub kind: StepKind,

    /// Executable override. Required for `exec` steps; the others default to
    /// `npm`, `bower` and `grunt`.
    #[serde(default)]
    pub executable: Option<String>,

    /// Extra arguments, appended after the tool-specific ones.
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Environment overrides for the spawned process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Exit codes treated as success; default is `[0]`.
    #[serde(default)]
    pub success_codes: Option<Vec<i32>>,

    /// Capture stdout/stderr instead of inheriting them.
    #[serde(default)]
    pub capture_output: bool,

    /// Bound on draining stdout; `<= 0` waits for end-of-file.
    #[serde(default)]
    pub stdout_timeout_ms: i64,

    /// Bound on draining stderr; `<= 0` waits for end-of-file.
    #[serde(default)]
    pub stderr_timeout_ms: i64,

    #[serde(default)]
    pub disabled: bool,

    /// Per-step override of `[build].show_colors`.
    #[serde(default)]
    pub show_colors: Option<bool>,

    /// Grunt target, passed as the first grunt argument.
    #[serde(default)]
    pub target: Option<String>,

    /// Grunt options; `--option value` is rewritten to `--option=value`.
    #[serde(default)]
    pub options: Vec<String>,

    /// Run grunt as `node <grunt>` instead of as its own executable.
    #[serde(default)]
    pub run_with_node: bool,

    /// Node binary used with `run_with_node` (default `node`).
    #[serde(default)]
    pub node_executable: Option<String>,

    /// Treat grunt task failures (exit codes 3 and 6) as success.
    #[serde(default)]
    pub ignore_tasks_errors: bool,

    /// Treat every grunt exit code (0 through 6) as success.
    #[serde(default)]
    pub ignore_all_errors: bool,
}

impl StepConfig {
    pub fn effective_show_colors(&self, build_default: bool) -> bool {
        self.show_colors.unwrap_or(build_default)
    }

    /// Whether any grunt-only field is set.
    pub fn has_grunt_fields(&self) -> bool {
        self.target.is_some()
            || !self.options.is_empty()
            || self.run_with_node
            || self.node_executable.is_some()
            || self.ignore_tasks_errors
            || self.ignore_all_errors
    }
}
