// src/exec/spec.rs

//! Description of one external command, independent of the host OS.

use std::collections::BTreeMap;

use tracing::debug;

use crate::exec::argument::{needs_normalization, normalize_argument};
use crate::types::SuccessPolicy;

/// Immutable description of one external command.
///
/// Built with [`ExecutableSpecBuilder`]; once built the argument list can no
/// longer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableSpec {
    name: String,
    arguments: Vec<String>,
    environment: Option<BTreeMap<String, String>>,
    success_policy: SuccessPolicy,
}

impl ExecutableSpec {
    pub fn builder(name: impl Into<String>) -> ExecutableSpecBuilder {
        ExecutableSpecBuilder::new(name)
    }

    /// Binary or command name, e.g. `npm` or `node`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in positional order.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Variables merged into the child's environment. `None` inherits the
    /// parent environment unchanged.
    pub fn environment(&self) -> Option<&BTreeMap<String, String>> {
        self.environment.as_ref()
    }

    pub fn success_policy(&self) -> &SuccessPolicy {
        &self.success_policy
    }
}

/// Append-only accumulator for an [`ExecutableSpec`].
#[derive(Debug, Clone)]
pub struct ExecutableSpecBuilder {
    name: String,
    arguments: Vec<String>,
    environment: Option<BTreeMap<String, String>>,
    success_policy: SuccessPolicy,
}

impl ExecutableSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            environment: None,
            success_policy: SuccessPolicy::Default,
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.arguments.push(value.into());
        self
    }

    /// Append an argument after collapsing `--option value` into
    /// `--option<replacement>value`.
    pub fn normalized_arg(mut self, value: &str, whitespace_replacement: &str) -> Self {
        if needs_normalization(value) {
            debug!(argument = %value, "normalizing whitespace-separated option");
        }
        self.arguments
            .push(normalize_argument(value, whitespace_replacement));
        self
    }

    /// Set one environment variable override.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Merge a whole map of overrides; later keys win.
    pub fn envs(mut self, vars: &BTreeMap<String, String>) -> Self {
        if vars.is_empty() {
            return self;
        }
        let environment = self.environment.get_or_insert_with(BTreeMap::new);
        for (key, value) in vars {
            environment.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn success_policy(mut self, policy: SuccessPolicy) -> Self {
        self.success_policy = policy;
        self
    }

    /// Freeze the accumulated state.
    pub fn build(self) -> ExecutableSpec {
        ExecutableSpec {
            name: self.name,
            arguments: self.arguments,
            environment: self.environment,
            success_policy: self.success_policy,
        }
    }
}
