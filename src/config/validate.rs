// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile, StepConfig};
use crate::errors::{FrontendExecError, Result};
use crate::types::StepKind;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::FrontendExecError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.build, raw.step))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_steps(cfg)?;
    validate_build_section(cfg)?;
    validate_step_names(cfg)?;
    for step in cfg.step.iter() {
        validate_step(step)?;
    }
    Ok(())
}

fn config_error(msg: impl Into<String>) -> FrontendExecError {
    FrontendExecError::ConfigError(msg.into())
}

fn ensure_has_steps(cfg: &RawConfigFile) -> Result<()> {
    if cfg.step.is_empty() {
        return Err(config_error(
            "config must contain at least one [[step]] section",
        ));
    }
    Ok(())
}

fn validate_build_section(cfg: &RawConfigFile) -> Result<()> {
    if cfg.build.working_directory.trim().is_empty() {
        return Err(config_error("[build].working_directory must not be empty"));
    }

    if let Some(os_name) = &cfg.build.os_name {
        if os_name.trim().is_empty() {
            return Err(config_error(
                "[build].os_name must not be empty when set",
            ));
        }
    }

    Ok(())
}

fn validate_step_names(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for step in cfg.step.iter() {
        if step.name.trim().is_empty() {
            return Err(config_error("every [[step]] needs a non-empty `name`"));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(config_error(format!(
                "step name '{}' is used more than once",
                step.name
            )));
        }
    }
    Ok(())
}

fn validate_step(step: &StepConfig) -> Result<()> {
    if let Some(exe) = &step.executable {
        if exe.trim().is_empty() {
            return Err(config_error(format!(
                "step '{}' has an empty `executable`",
                step.name
            )));
        }
    }

    if step.kind == StepKind::Exec && step.executable.is_none() {
        return Err(config_error(format!(
            "step '{}' of kind exec requires `executable`",
            step.name
        )));
    }

    if step.kind != StepKind::Grunt && step.has_grunt_fields() {
        return Err(config_error(format!(
            "step '{}' sets grunt-only fields but has kind {}",
            step.name, step.kind
        )));
    }

    if let Some(codes) = &step.success_codes {
        if codes.is_empty() {
            return Err(config_error(format!(
                "step '{}' has an empty `success_codes` list",
                step.name
            )));
        }
        if step.ignore_tasks_errors || step.ignore_all_errors {
            return Err(config_error(format!(
                "step '{}' cannot combine `success_codes` with ignore_tasks_errors/ignore_all_errors",
                step.name
            )));
        }
    }

    Ok(())
}
