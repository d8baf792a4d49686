#![allow(dead_code)]

use std::collections::BTreeMap;

use frontend_exec::config::{BuildSection, ConfigFile, RawConfigFile, StepConfig};
use frontend_exec::types::StepKind;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                build: BuildSection::default(),
                step: Vec::new(),
            },
        }
    }

    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.config.step.push(step);
        self
    }

    pub fn working_directory(mut self, dir: &str) -> Self {
        self.config.build.working_directory = dir.to_string();
        self
    }

    pub fn os_name(mut self, name: &str) -> Self {
        self.config.build.os_name = Some(name.to_string());
        self
    }

    pub fn show_colors(mut self, val: bool) -> Self {
        self.config.build.show_colors = val;
        self
    }

    pub fn disabled(mut self, val: bool) -> Self {
        self.config.build.disabled = val;
        self
    }

    /// The unvalidated config, for tests that exercise validation.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `StepConfig`.
pub struct StepConfigBuilder {
    step: StepConfig,
}

impl StepConfigBuilder {
    pub fn new(name: &str, kind: StepKind) -> Self {
        Self {
            step: StepConfig {
                name: name.to_string(),
                kind,
                executable: None,
                arguments: vec![],
                env: BTreeMap::new(),
                success_codes: None,
                capture_output: false,
                stdout_timeout_ms: 0,
                stderr_timeout_ms: 0,
                disabled: false,
                show_colors: None,
                target: None,
                options: vec![],
                run_with_node: false,
                node_executable: None,
                ignore_tasks_errors: false,
                ignore_all_errors: false,
            },
        }
    }

    pub fn npm(name: &str) -> Self {
        Self::new(name, StepKind::Npm)
    }

    pub fn bower(name: &str) -> Self {
        Self::new(name, StepKind::Bower)
    }

    pub fn grunt(name: &str) -> Self {
        Self::new(name, StepKind::Grunt)
    }

    pub fn exec(name: &str, executable: &str) -> Self {
        Self::new(name, StepKind::Exec).executable(executable)
    }

    pub fn executable(mut self, exe: &str) -> Self {
        self.step.executable = Some(exe.to_string());
        self
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.step.arguments.push(arg.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.step.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn success_codes(mut self, codes: &[i32]) -> Self {
        self.step.success_codes = Some(codes.to_vec());
        self
    }

    pub fn capture_output(mut self, stdout_timeout_ms: i64, stderr_timeout_ms: i64) -> Self {
        self.step.capture_output = true;
        self.step.stdout_timeout_ms = stdout_timeout_ms;
        self.step.stderr_timeout_ms = stderr_timeout_ms;
        self
    }

    pub fn disabled(mut self, val: bool) -> Self {
        self.step.disabled = val;
        self
    }

    pub fn show_colors(mut self, val: bool) -> Self {
        self.step.show_colors = Some(val);
        self
    }

    pub fn target(mut self, target: &str) -> Self {
        self.step.target = Some(target.to_string());
        self
    }

    pub fn option(mut self, option: &str) -> Self {
        self.step.options.push(option.to_string());
        self
    }

    pub fn run_with_node(mut self, node: Option<&str>) -> Self {
        self.step.run_with_node = true;
        self.step.node_executable = node.map(str::to_string);
        self
    }

    pub fn ignore_tasks_errors(mut self, val: bool) -> Self {
        self.step.ignore_tasks_errors = val;
        self
    }

    pub fn ignore_all_errors(mut self, val: bool) -> Self {
        self.step.ignore_all_errors = val;
        self
    }

    pub fn build(self) -> StepConfig {
        self.step
    }
}
