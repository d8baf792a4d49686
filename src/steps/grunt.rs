// src/steps/grunt.rs

//! Grunt task-runner steps.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::StepConfig;
use crate::exec::{ExecutableSpec, ExecutableSpecBuilder};
use crate::types::SuccessPolicy;

pub const DEFAULT_GRUNT_EXECUTABLE: &str = "grunt";
pub const DEFAULT_NODE_EXECUTABLE: &str = "node";

const NO_COLOR_FLAG: &str = "--no-color";

/// Grunt options are sent through with `--option=value` syntax.
pub const OPTION_VALUE_SEPARATOR: &str = "=";

static GRUNT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"grunt v?(\d+\.\d+\.\d+)").expect("grunt version pattern is valid")
});

/// Grunt executable (or the node interpreter when `run_with_node`), used as
/// the program for this step.
pub fn grunt_executable(step: &StepConfig) -> &str {
    step.executable.as_deref().unwrap_or(DEFAULT_GRUNT_EXECUTABLE)
}

fn base_builder(step: &StepConfig) -> ExecutableSpecBuilder {
    if step.run_with_node {
        let node = step
            .node_executable
            .as_deref()
            .unwrap_or(DEFAULT_NODE_EXECUTABLE);
        ExecutableSpec::builder(node).arg(grunt_executable(step))
    } else {
        ExecutableSpec::builder(grunt_executable(step))
    }
}

/// `grunt [target] [--no-color] [options...]`, or the same prefixed with
/// `node` when grunt runs as a node module.
pub fn grunt_spec(step: &StepConfig, show_colors: bool) -> ExecutableSpecBuilder {
    let mut builder = base_builder(step);

    if let Some(target) = step.target.as_deref().filter(|t| !t.is_empty()) {
        builder = builder.arg(target);
    }
    if !show_colors {
        builder = builder.arg(NO_COLOR_FLAG);
    }
    for option in &step.options {
        builder = builder.normalized_arg(option, OPTION_VALUE_SEPARATOR);
    }

    builder.success_policy(grunt_success_policy(step))
}

/// `ignore_all_errors` wins over `ignore_tasks_errors`.
pub fn grunt_success_policy(step: &StepConfig) -> SuccessPolicy {
    if step.ignore_all_errors {
        SuccessPolicy::ignore_all_errors()
    } else if step.ignore_tasks_errors {
        SuccessPolicy::ignore_task_errors()
    } else {
        SuccessPolicy::Default
    }
}

/// Spec for `grunt --version`, keeping the `node` prefix if configured.
pub fn grunt_version_spec(step: &StepConfig, version_flag: &str) -> ExecutableSpec {
    base_builder(step).arg(version_flag).envs(&step.env).build()
}

/// Pull `x.y.z` out of grunt's `--version` output
/// (e.g. `grunt-cli v1.4.3\ngrunt v1.6.1`).
pub fn parse_grunt_version(output: &str) -> Option<String> {
    GRUNT_VERSION
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
