// tests/invocation_shape.rs

use std::path::PathBuf;

use proptest::prelude::*;
use frontend_exec::errors::FrontendExecError;
use frontend_exec::exec::{ExecutableSpec, InvocationBuilder};
use frontend_exec::types::{OsFamily, SuccessPolicy};

fn sample_spec() -> ExecutableSpec {
    ExecutableSpec::builder("npm")
        .arg("install")
        .arg("--color=false")
        .env("NODE_ENV", "production")
        .success_policy(SuccessPolicy::Custom([0, 1].into_iter().collect()))
        .build()
}

#[test]
fn os_names_are_classified_by_family() {
    for name in ["Linux", "Mac OS X", "FreeBSD", "SunOS", "linux", "macos"] {
        assert_eq!(OsFamily::from_os_name(Some(name)).unwrap(), OsFamily::Posix, "{name}");
    }
    for name in ["Windows 10", "Windows Server 2019", "WINDOWS", "windows"] {
        assert_eq!(OsFamily::from_os_name(Some(name)).unwrap(), OsFamily::Windows, "{name}");
    }
}

#[test]
fn unset_os_name_is_a_configuration_error() {
    for name in [None, Some(""), Some("   ")] {
        match OsFamily::from_os_name(name) {
            Err(FrontendExecError::ConfigError(msg)) => assert!(msg.contains("OS name")),
            other => panic!("expected ConfigError for {name:?}, got {other:?}"),
        }
    }
}

#[test]
fn detected_family_matches_host_os_name() {
    let from_name = OsFamily::from_os_name(Some(std::env::consts::OS)).unwrap();
    assert_eq!(OsFamily::detect(), from_name);
}

#[test]
fn posix_invocation_runs_executable_directly() {
    let builder = InvocationBuilder::new(OsFamily::Posix, "/work/target-grunt");
    let inv = builder.build(&sample_spec());

    assert_eq!(inv.program, "npm");
    assert_eq!(inv.args, vec!["install".to_string(), "--color=false".to_string()]);
    assert_eq!(inv.working_directory, PathBuf::from("/work/target-grunt"));
    assert_eq!(inv.executable, "npm");
}

#[test]
fn windows_invocation_goes_through_cmd() {
    let builder = InvocationBuilder::new(OsFamily::Windows, "C:\\work\\target-grunt");
    let inv = builder.build(&sample_spec());

    assert_eq!(inv.program, "cmd");
    assert_eq!(
        inv.args,
        vec![
            "/C".to_string(),
            "npm".to_string(),
            "install".to_string(),
            "--color=false".to_string()
        ]
    );
    assert_eq!(inv.working_directory, PathBuf::from("C:\\work\\target-grunt"));
    assert_eq!(inv.executable, "npm");
}

#[test]
fn environment_and_policy_are_carried_through() {
    let inv = InvocationBuilder::new(OsFamily::Posix, ".").build(&sample_spec());

    let env = inv.environment.expect("environment overrides");
    assert_eq!(env.get("NODE_ENV").map(String::as_str), Some("production"));
    assert!(inv.success_policy.is_success(1));
    assert!(!inv.success_policy.is_success(2));
}

#[test]
fn spec_without_env_inherits() {
    let spec = ExecutableSpec::builder("bower").arg("install").build();
    let inv = InvocationBuilder::new(OsFamily::Posix, ".").build(&spec);
    assert!(inv.environment.is_none());
}

#[test]
fn display_shows_full_command_line() {
    let inv = InvocationBuilder::new(OsFamily::Windows, ".").build(&sample_spec());
    assert_eq!(inv.to_string(), "cmd /C npm install --color=false");
}

proptest! {
    #[test]
    fn posix_argv_is_spec_arguments_verbatim(
        name in "[a-z][a-z0-9_-]{0,10}",
        args in proptest::collection::vec("[ -~]{0,12}", 0..8),
    ) {
        let spec = args
            .iter()
            .fold(ExecutableSpec::builder(name.clone()), |b, a| b.arg(a.clone()))
            .build();
        let inv = InvocationBuilder::new(OsFamily::Posix, "/tmp/wd").build(&spec);

        prop_assert_eq!(&inv.program, &name);
        prop_assert_eq!(&inv.args, &args);
        prop_assert_eq!(inv.working_directory, PathBuf::from("/tmp/wd"));
    }

    #[test]
    fn windows_argv_is_prefixed_then_verbatim(
        name in "[a-z][a-z0-9_-]{0,10}",
        args in proptest::collection::vec("[ -~]{0,12}", 0..8),
    ) {
        let spec = args
            .iter()
            .fold(ExecutableSpec::builder(name.clone()), |b, a| b.arg(a.clone()))
            .build();
        let inv = InvocationBuilder::new(OsFamily::Windows, "/tmp/wd").build(&spec);

        prop_assert_eq!(inv.program.as_str(), "cmd");
        prop_assert_eq!(inv.args[0].as_str(), "/C");
        prop_assert_eq!(&inv.args[1], &name);
        prop_assert_eq!(&inv.args[2..], &args[..]);
    }
}
