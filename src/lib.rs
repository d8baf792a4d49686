// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod steps;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::exec::{InvocationBuilder, Orchestrator, PlannedStep, RealProcessBackend};
use crate::steps::version::probe_version;
use crate::types::OsFamily;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - OS family resolution
/// - step planning
/// - the orchestrator with the real process backend
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    let os_name = resolve_os_name(args.os_name.as_deref(), &cfg);
    info!(os_name = %os_name, "OS name");
    let os_family = OsFamily::from_os_name(Some(os_name.as_str()))?;

    if cfg.build.disabled {
        info!("execution disabled using configuration option");
        return Ok(());
    }

    let working_dir = cfg.working_directory(&config_root_dir(&config_path));
    let invocations = InvocationBuilder::new(os_family, working_dir);

    if args.versions {
        let mut backend = RealProcessBackend::default();
        for step in steps::select_steps(&cfg, &args.steps)? {
            let version = probe_version(&mut backend, &invocations, step).await;
            println!(
                "{}: {}",
                step.name,
                version.as_deref().unwrap_or("unknown")
            );
        }
        return Ok(());
    }

    let steps = steps::plan_steps(&cfg, &args.steps)?;

    if args.dry_run {
        print_dry_run(&invocations, &steps);
        return Ok(());
    }

    let mut orchestrator = Orchestrator::new(invocations, RealProcessBackend::default());
    let reports = orchestrator.run(&steps).await?;

    for report in reports {
        if !report.result.stdout.is_empty() {
            println!("{}", report.result.stdout);
        }
    }

    Ok(())
}

/// `--os-name`, then `[build].os_name`, then the host.
pub fn resolve_os_name(cli_os_name: Option<&str>, cfg: &ConfigFile) -> String {
    cli_os_name
        .map(str::to_string)
        .or_else(|| cfg.build.os_name.clone())
        .unwrap_or_else(|| std::env::consts::OS.to_string())
}

/// Directory relative working directories are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "web/Frontend.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Frontend.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Dry-run output: one OS-shaped command line per step.
fn print_dry_run(invocations: &InvocationBuilder, steps: &[PlannedStep]) {
    println!("frontend-exec dry-run");
    println!("  os_family = {}", invocations.os_family());
    println!("  working_directory = {}", invocations.working_directory().display());
    println!();

    println!("steps ({}):", steps.len());
    for step in steps {
        let invocation = invocations.build(&step.spec);
        println!("  - {}", step.name);
        println!("      cmd: {invocation}");
        if let Some(env) = &invocation.environment {
            println!("      env: {:?}", env);
        }
        if !invocation.success_policy.is_default() {
            println!("      success_codes: {:?}", invocation.success_policy);
        }
        if step.options.capture_output {
            println!(
                "      capture_output: true (stdout {:?}, stderr {:?})",
                step.options.stdout_timeout, step.options.stderr_timeout
            );
        }
    }

    debug!("dry-run complete (no execution)");
}
