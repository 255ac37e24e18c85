//! Tests for the `preflight` application service.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Output;

use botstrap_cli::application::services::preflight::{
    CHECK_DOTENV, CHECK_ENTRY_POINT, CHECK_ENVIRONMENT, CHECK_INTERPRETER, CHECK_MANIFEST,
    CHECK_PROJECT_ROOT, run_preflight,
};
use botstrap_cli::domain::{CheckStatus, EnvLayout, PreflightReport};

use crate::helpers::{Journal, Project, RecordingRunner, exit_status};

fn version_ok() -> Output {
    Output {
        status: exit_status(0),
        stdout: b"Python 3.12.1\n".to_vec(),
        stderr: Vec::new(),
    }
}

async fn check(project: &Project, runner: &RecordingRunner) -> PreflightReport {
    check_with_env(project, runner, &[]).await
}

async fn check_with_env(
    project: &Project,
    runner: &RecordingRunner,
    exported: &[(&str, &str)],
) -> PreflightReport {
    let inherited: HashMap<String, String> = exported
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    run_preflight(&project.fs, runner, &project.settings, EnvLayout::host(), &inherited).await
}

fn status(report: &PreflightReport, name: &str) -> CheckStatus {
    report.get(name).map(|c| c.status).expect("check present")
}

#[tokio::test]
async fn ready_project_passes_and_reports_python_version() {
    let mut project = Project::ready();
    project.fs.add_file(
        project.settings.dotenv_path(),
        "DISCORD_BOT_TOKEN=abc\nDATABASE_URL=postgres://db/bot\n",
    );
    let journal = Journal::default();
    let runner = RecordingRunner::new(&journal).version_output(version_ok());

    let report = check(&project, &runner).await;

    assert!(report.is_ready(), "{report:?}");
    for name in [
        CHECK_PROJECT_ROOT,
        CHECK_ENVIRONMENT,
        CHECK_INTERPRETER,
        CHECK_MANIFEST,
        CHECK_ENTRY_POINT,
        CHECK_DOTENV,
    ] {
        assert_eq!(status(&report, name), CheckStatus::Pass, "{name}");
    }
    assert_eq!(
        report.get(CHECK_INTERPRETER).map(|c| c.detail.as_str()),
        Some("Python 3.12.1")
    );
}

#[tokio::test]
async fn preflight_never_installs_or_launches() {
    let project = Project::ready();
    let journal = Journal::default();
    let runner = RecordingRunner::new(&journal).version_output(version_ok());

    check(&project, &runner).await;

    assert_eq!(runner.call_kinds(), vec!["version"]);
    assert!(!journal.contains("run:"));
}

#[tokio::test]
async fn missing_root_stops_after_first_check() {
    let mut project = Project::ready();
    project.settings.project_root = PathBuf::from("/definitely/not/here");
    let runner = RecordingRunner::new(&Journal::default());

    let report = check(&project, &runner).await;

    assert!(!report.is_ready());
    assert_eq!(report.checks.len(), 1);
    assert_eq!(status(&report, CHECK_PROJECT_ROOT), CheckStatus::Fail);
}

#[tokio::test]
async fn missing_environment_fails_with_creation_hint() {
    let project = Project::bare();
    let runner = RecordingRunner::new(&Journal::default());

    let report = check(&project, &runner).await;

    assert!(!report.is_ready());
    let env = report.get(CHECK_ENVIRONMENT).expect("environment check");
    assert_eq!(env.status, CheckStatus::Fail);
    assert!(env.detail.contains("python -m venv venv"), "{}", env.detail);
    assert!(report.get(CHECK_INTERPRETER).is_none());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn broken_interpreter_fails() {
    let project = Project::ready();
    let runner = RecordingRunner::new(&Journal::default()).version_output(Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: b"bad interpreter".to_vec(),
    });

    let report = check(&project, &runner).await;

    assert_eq!(status(&report, CHECK_INTERPRETER), CheckStatus::Fail);
}

#[tokio::test]
async fn missing_dotenv_keys_only_warn() {
    let mut project = Project::ready();
    project
        .fs
        .add_file(project.settings.dotenv_path(), "DISCORD_BOT_TOKEN=abc\n");
    let runner = RecordingRunner::new(&Journal::default()).version_output(version_ok());

    let report = check(&project, &runner).await;

    let dotenv = report.get(CHECK_DOTENV).expect("dotenv check");
    assert_eq!(dotenv.status, CheckStatus::Warn);
    assert!(dotenv.detail.contains("DATABASE_URL"), "{}", dotenv.detail);
    assert!(report.is_ready());
}

#[tokio::test]
async fn exported_keys_satisfy_dotenv_check() {
    let mut project = Project::ready();
    project
        .fs
        .add_file(project.settings.dotenv_path(), "DISCORD_BOT_TOKEN=abc\n");
    let runner = RecordingRunner::new(&Journal::default()).version_output(version_ok());

    let report = check_with_env(&project, &runner, &[("DATABASE_URL", "postgres://db/bot")]).await;

    assert_eq!(status(&report, CHECK_DOTENV), CheckStatus::Pass);
}

#[tokio::test]
async fn empty_exported_key_is_still_missing() {
    let mut project = Project::ready();
    project
        .fs
        .add_file(project.settings.dotenv_path(), "DISCORD_BOT_TOKEN=abc\n");
    let runner = RecordingRunner::new(&Journal::default()).version_output(version_ok());

    let report = check_with_env(&project, &runner, &[("DATABASE_URL", "")]).await;

    let dotenv = report.get(CHECK_DOTENV).expect("dotenv check");
    assert_eq!(dotenv.status, CheckStatus::Warn);
    assert!(dotenv.detail.contains("DATABASE_URL"), "{}", dotenv.detail);
}

#[tokio::test]
async fn missing_dotenv_passes_when_all_keys_exported() {
    let project = Project::ready();
    let runner = RecordingRunner::new(&Journal::default()).version_output(version_ok());

    let report = check_with_env(
        &project,
        &runner,
        &[("DISCORD_BOT_TOKEN", "abc"), ("DATABASE_URL", "postgres://db/bot")],
    )
    .await;

    assert_eq!(status(&report, CHECK_DOTENV), CheckStatus::Pass);
}

#[tokio::test]
async fn missing_manifest_and_entry_point_fail() {
    let mut project = Project::bare();
    project.add_environment();
    let runner = RecordingRunner::new(&Journal::default()).version_output(version_ok());

    let report = check(&project, &runner).await;

    assert_eq!(status(&report, CHECK_MANIFEST), CheckStatus::Fail);
    assert_eq!(status(&report, CHECK_ENTRY_POINT), CheckStatus::Fail);
    assert!(!report.is_ready());
}
