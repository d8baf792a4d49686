// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `frontend-exec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "frontend-exec",
    version,
    about = "Run front-end build steps (npm, bower, grunt, ...) in order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the build description (TOML).
    ///
    /// Default: `Frontend.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Frontend.toml")]
    pub config: String,

    /// Run only the named step(s). May be repeated; config order is kept.
    #[arg(long = "step", value_name = "NAME")]
    pub steps: Vec<String>,

    /// Host OS name (e.g. "Linux", "Windows 10"). Overrides `[build].os_name`;
    /// defaults to the host.
    #[arg(long, value_name = "NAME")]
    pub os_name: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FRONTEND_EXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the invocations, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print each selected step's tool version instead of running it.
    #[arg(long)]
    pub versions: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
