// tests/logging_levels.rs

use clap::Parser;
use tracing::Level;

use frontend_exec::cli::{CliArgs, LogLevel};
use frontend_exec::logging::resolve_level;
use frontend_exec::resolve_os_name;
use frontend_exec_test_utils::builders::{ConfigFileBuilder, StepConfigBuilder};

#[test]
fn cli_level_wins_over_env() {
    assert_eq!(resolve_level(Some(LogLevel::Debug), Some("error")), Level::DEBUG);
    assert_eq!(resolve_level(Some(LogLevel::Trace), None), Level::TRACE);
}

#[test]
fn env_level_is_used_without_cli_flag() {
    assert_eq!(resolve_level(None, Some("warn")), Level::WARN);
    assert_eq!(resolve_level(None, Some(" WARNING ")), Level::WARN);
    assert_eq!(resolve_level(None, Some("Debug")), Level::DEBUG);
}

#[test]
fn default_is_info() {
    assert_eq!(resolve_level(None, None), Level::INFO);
    assert_eq!(resolve_level(None, Some("chatty")), Level::INFO);
}

#[test]
fn cli_defaults() {
    let args = CliArgs::try_parse_from(["frontend-exec"]).unwrap();
    assert_eq!(args.config, "Frontend.toml");
    assert!(args.steps.is_empty());
    assert!(args.os_name.is_none());
    assert!(args.log_level.is_none());
    assert!(!args.dry_run);
    assert!(!args.versions);
}

#[test]
fn cli_accepts_repeated_steps_and_flags() {
    let args = CliArgs::try_parse_from([
        "frontend-exec",
        "--config",
        "web/Frontend.toml",
        "--step",
        "deps",
        "--step",
        "build",
        "--os-name",
        "Windows 10",
        "--log-level",
        "debug",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(args.config, "web/Frontend.toml");
    assert_eq!(args.steps, vec!["deps", "build"]);
    assert_eq!(args.os_name.as_deref(), Some("Windows 10"));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(args.dry_run);
}

#[test]
fn os_name_resolution_order() {
    let configured = ConfigFileBuilder::new()
        .os_name("Windows 10")
        .with_step(StepConfigBuilder::npm("deps").build())
        .build();
    let unset = ConfigFileBuilder::new()
        .with_step(StepConfigBuilder::npm("deps").build())
        .build();

    assert_eq!(resolve_os_name(Some("Linux"), &configured), "Linux");
    assert_eq!(resolve_os_name(None, &configured), "Windows 10");
    assert_eq!(resolve_os_name(None, &unset), std::env::consts::OS);
}
