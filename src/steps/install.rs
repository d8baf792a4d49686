// src/steps/install.rs

//! `npm install` / `bower install` steps.

use crate::config::model::StepConfig;
use crate::exec::{ExecutableSpec, ExecutableSpecBuilder};

pub const DEFAULT_NPM_EXECUTABLE: &str = "npm";
pub const DEFAULT_BOWER_EXECUTABLE: &str = "bower";

const INSTALL_COMMAND: &str = "install";
const NO_COLOR_FLAG: &str = "--color=false";

/// `<executable> install [--color=false]`.
///
/// `default_executable` is used unless the step overrides `executable`.
pub fn install_spec(
    step: &StepConfig,
    default_executable: &str,
    show_colors: bool,
) -> ExecutableSpecBuilder {
    let executable = step.executable.as_deref().unwrap_or(default_executable);
    let mut builder = ExecutableSpec::builder(executable).arg(INSTALL_COMMAND);
    if !show_colors {
        builder = builder.arg(NO_COLOR_FLAG);
    }
    builder
}
