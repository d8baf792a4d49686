// src/steps/mod.rs

//! Translation of configured build steps into executable specs.
//!
//! - [`install`] builds `npm install` / `bower install`.
//! - [`grunt`] builds grunt invocations and its success-code presets.
//! - [`version`] probes a tool's `--version`.
//!
//! `exec` steps need no helper: they are just `executable` plus
//! `arguments`.

pub mod grunt;
pub mod install;
pub mod version;

use tracing::info;

use crate::config::model::{BuildSection, ConfigFile, StepConfig};
use crate::errors::{FrontendExecError, Result};
use crate::exec::{ExecutableSpec, PlannedStep, RunOptions};
use crate::types::{StepKind, StreamTimeout, SuccessPolicy};

/// Program name the step resolves to before any OS wrapping.
pub fn executable_name(step: &StepConfig) -> &str {
    match step.kind {
        StepKind::Npm => step
            .executable
            .as_deref()
            .unwrap_or(install::DEFAULT_NPM_EXECUTABLE),
        StepKind::Bower => step
            .executable
            .as_deref()
            .unwrap_or(install::DEFAULT_BOWER_EXECUTABLE),
        StepKind::Grunt if step.run_with_node => step
            .node_executable
            .as_deref()
            .unwrap_or(grunt::DEFAULT_NODE_EXECUTABLE),
        StepKind::Grunt => grunt::grunt_executable(step),
        // Validation guarantees exec steps carry an executable.
        StepKind::Exec => step.executable.as_deref().unwrap_or_default(),
    }
}

/// Build the executable spec for one step.
///
/// Tool-specific arguments come first, then the step's extra `arguments`
/// verbatim. An explicit `success_codes` list replaces the tool's policy.
pub fn executable_spec(step: &StepConfig, build: &BuildSection) -> ExecutableSpec {
    let show_colors = step.effective_show_colors(build.show_colors);

    let mut builder = match step.kind {
        StepKind::Npm => {
            install::install_spec(step, install::DEFAULT_NPM_EXECUTABLE, show_colors)
        }
        StepKind::Bower => {
            install::install_spec(step, install::DEFAULT_BOWER_EXECUTABLE, show_colors)
        }
        StepKind::Grunt => grunt::grunt_spec(step, show_colors),
        StepKind::Exec => ExecutableSpec::builder(executable_name(step)),
    };

    for arg in &step.arguments {
        builder = builder.arg(arg.as_str());
    }
    builder = builder.envs(&step.env);

    if step.success_codes.is_some() {
        builder = builder.success_policy(SuccessPolicy::from_codes(step.success_codes.clone()));
    }

    builder.build()
}

pub fn run_options(step: &StepConfig) -> RunOptions {
    RunOptions {
        capture_output: step.capture_output,
        stdout_timeout: StreamTimeout::from_millis(step.stdout_timeout_ms),
        stderr_timeout: StreamTimeout::from_millis(step.stderr_timeout_ms),
    }
}

pub fn plan_step(step: &StepConfig, build: &BuildSection) -> PlannedStep {
    PlannedStep::new(step.name.clone(), executable_spec(step, build))
        .with_options(run_options(step))
}

/// Enabled steps in config order, optionally restricted to `only`.
///
/// Unknown names in `only` are a configuration error.
pub fn select_steps<'a>(cfg: &'a ConfigFile, only: &[String]) -> Result<Vec<&'a StepConfig>> {
    for name in only {
        if cfg.step_named(name).is_none() {
            return Err(FrontendExecError::ConfigError(format!(
                "unknown step '{}' requested",
                name
            )));
        }
    }

    let selected = cfg
        .step
        .iter()
        .filter(|step| only.is_empty() || only.contains(&step.name))
        .filter(|step| {
            if step.disabled {
                info!(step = %step.name, "step disabled using configuration option; skipping");
            }
            !step.disabled
        })
        .collect();

    Ok(selected)
}

/// Plan the selected steps for execution.
pub fn plan_steps(cfg: &ConfigFile, only: &[String]) -> Result<Vec<PlannedStep>> {
    Ok(select_steps(cfg, only)?
        .into_iter()
        .map(|step| plan_step(step, &cfg.build))
        .collect())
}
