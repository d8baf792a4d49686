// tests/runner_real_process.rs
//
// Spawns real processes through `sh`, so POSIX hosts only.
#![cfg(unix)]

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use tokio::time::{timeout, Duration};

use frontend_exec::errors::FrontendExecError;
use frontend_exec::exec::{ExecutableSpec, Invocation, InvocationBuilder, ProcessRunner, RunOptions};
use frontend_exec::fs::mock::MockFileSystem;
use frontend_exec::types::{OsFamily, StreamTimeout, SuccessPolicy};
use frontend_exec_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn shell(script: &str, dir: &std::path::Path) -> Invocation {
    let spec = ExecutableSpec::builder("sh").arg("-c").arg(script).build();
    InvocationBuilder::new(OsFamily::Posix, dir).build(&spec)
}

fn capture_all() -> RunOptions {
    RunOptions::captured(StreamTimeout::Unbounded, StreamTimeout::Unbounded)
}

#[tokio::test]
async fn captures_trimmed_stdout_on_success() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let out = ProcessRunner::default()
        .run(&shell("echo '  hello'; echo world; echo oops >&2", dir.path()), capture_all())
        .await?;

    assert_eq!(out, "hello\nworld");
    Ok(())
}

#[tokio::test]
async fn execute_reports_both_streams() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let result = ProcessRunner::default()
        .execute(&shell("echo out; echo err >&2; exit 3", dir.path()), capture_all())
        .await?;

    assert_eq!(result.exit_code, 3);
    assert_eq!(result.stdout, "out");
    assert_eq!(result.stderr, "err");
    assert!(!result.succeeded);
    assert!(!result.stdout_timed_out);
    assert!(!result.stderr_timed_out);
    Ok(())
}

#[tokio::test]
async fn non_success_exit_surfaces_structured_failure() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let err = ProcessRunner::default()
        .run(&shell("echo partial; echo broken >&2; exit 5", dir.path()), capture_all())
        .await
        .unwrap_err();

    match err {
        FrontendExecError::NonZeroExit {
            exit_code,
            stdout,
            stderr,
        } => {
            assert_eq!(exit_code, 5);
            assert_eq!(stdout, "partial");
            assert_eq!(stderr, "broken");
        }
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn custom_success_codes_tolerate_exit_code() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let spec = ExecutableSpec::builder("sh")
        .arg("-c")
        .arg("echo tolerated; exit 1")
        .success_policy(SuccessPolicy::from_codes(Some(vec![0, 1, 2])))
        .build();
    let inv = InvocationBuilder::new(OsFamily::Posix, dir.path()).build(&spec);

    let out = ProcessRunner::default().run(&inv, capture_all()).await?;
    assert_eq!(out, "tolerated");
    Ok(())
}

#[tokio::test]
async fn runs_inside_existing_working_directory() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("marker.txt"), "found")?;

    let out = ProcessRunner::default()
        .run(&shell("cat marker.txt", dir.path()), capture_all())
        .await?;

    assert_eq!(out, "found");
    Ok(())
}

#[tokio::test]
async fn missing_working_directory_falls_back_to_current_directory() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("does-not-exist");

    let out = ProcessRunner::default()
        .run(&shell("pwd", &missing), capture_all())
        .await?;

    let cwd = std::env::current_dir()?.canonicalize()?;
    assert_eq!(std::path::PathBuf::from(out).canonicalize()?, cwd);
    Ok(())
}

#[tokio::test]
async fn directory_check_goes_through_filesystem() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    // The directory exists on disk but not in the mock, so it is not used.
    let runner = ProcessRunner::new(Arc::new(MockFileSystem::new()));
    let out = runner.run(&shell("pwd", dir.path()), capture_all()).await?;

    let cwd = std::env::current_dir()?.canonicalize()?;
    assert_eq!(std::path::PathBuf::from(out).canonicalize()?, cwd);
    Ok(())
}

#[tokio::test]
async fn environment_overrides_reach_the_child() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let spec = ExecutableSpec::builder("sh")
        .arg("-c")
        .arg("echo \"$FRONTEND_EXEC_TEST_VAR\"")
        .env("FRONTEND_EXEC_TEST_VAR", "from-spec")
        .build();
    let inv = InvocationBuilder::new(OsFamily::Posix, dir.path()).build(&spec);

    let out = ProcessRunner::default().run(&inv, capture_all()).await?;
    assert_eq!(out, "from-spec");
    Ok(())
}

#[tokio::test]
async fn missing_executable_is_a_spawn_failure() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let spec = ExecutableSpec::builder("frontend-exec-no-such-binary").build();
    let inv = InvocationBuilder::new(OsFamily::Posix, dir.path()).build(&spec);

    match ProcessRunner::default().run(&inv, capture_all()).await {
        Err(FrontendExecError::SpawnFailure { program, .. }) => {
            assert_eq!(program, "frontend-exec-no-such-binary");
        }
        other => panic!("expected SpawnFailure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn uncaptured_run_returns_empty_output() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let result = ProcessRunner::default()
        .execute(&shell("exit 0", dir.path()), RunOptions::default())
        .await?;

    assert!(result.succeeded);
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
    Ok(())
}

#[tokio::test]
async fn large_output_on_both_streams_does_not_deadlock() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    // Well past a pipe buffer on each stream.
    let script = "i=0; while [ $i -lt 5000 ]; do echo line-$i; echo err-$i >&2; i=$((i+1)); done";

    let result = timeout(
        Duration::from_secs(20),
        ProcessRunner::default().execute(&shell(script, dir.path()), capture_all()),
    )
    .await
    .expect("runner deadlocked on full pipes")?;

    assert!(result.succeeded);
    assert_eq!(result.stdout.lines().count(), 5000);
    assert_eq!(result.stderr.lines().count(), 5000);
    Ok(())
}

#[tokio::test]
async fn stderr_timeout_returns_with_stdout_when_stderr_never_closes() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    // The shell exits right away, but a background child keeps stderr open
    // (stdout is closed first so only stderr stays held).
    let script = "echo ready; exec 1>&-; sleep 3 & exit 0";
    let options = RunOptions::captured(
        StreamTimeout::Unbounded,
        StreamTimeout::from_millis(100),
    );

    let started = Instant::now();
    let result = timeout(
        Duration::from_secs(2),
        ProcessRunner::default().execute(&shell(script, dir.path()), options),
    )
    .await
    .expect("runner hung on a stream that never closes")?;

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert!(result.succeeded);
    assert_eq!(result.stdout, "ready");
    assert!(result.stderr.is_empty());
    assert!(result.stderr_timed_out);
    assert!(!result.stdout_timed_out);
    Ok(())
}

#[tokio::test]
async fn stdout_timeout_keeps_partial_line_when_stdout_never_closes() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    // No trailing newline, and the background child inherits both streams.
    let script = "printf partial; sleep 5 & exit 0";
    let options = RunOptions::captured(
        StreamTimeout::from_millis(100),
        StreamTimeout::from_millis(100),
    );

    let started = Instant::now();
    let result = timeout(
        Duration::from_secs(3),
        ProcessRunner::default().execute(&shell(script, dir.path()), options),
    )
    .await
    .expect("runner hung on a stdout that never closes")?;

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert!(result.succeeded);
    assert_eq!(result.stdout, "partial");
    assert!(result.stdout_timed_out);
    assert!(result.stderr_timed_out);
    Ok(())
}

#[tokio::test]
async fn signal_killed_process_reports_minus_one() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let result = ProcessRunner::default()
        .execute(&shell("echo before; kill -9 $$", dir.path()), capture_all())
        .await?;

    assert_eq!(result.exit_code, -1);
    assert!(!result.succeeded);
    assert_eq!(result.stdout, "before");

    match result.into_output() {
        Err(FrontendExecError::NonZeroExit { exit_code, .. }) => assert_eq!(exit_code, -1),
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
    Ok(())
}
