// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontendExecError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The OS refused to create the child process (missing binary,
    /// permission denied, ...).
    #[error("failed to spawn '{program}': {source}")]
    SpawnFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process terminated with an exit code outside its success policy.
    #[error("process exited with code {exit_code}: {stderr}")]
    NonZeroExit {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrontendExecError {
    /// Exit code carried by a `NonZeroExit`, if this is one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            FrontendExecError::NonZeroExit { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FrontendExecError>;
