//! Integration tests for `botstrap check`.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use predicates::prelude::*;
use serial_test::serial;

use crate::fixture::BotProject;

#[test]
#[serial]
fn test_check_ready_project_reports_interpreter_version() {
    let project = BotProject::ready();
    project.write(".env", "DISCORD_BOT_TOKEN=abc\nDATABASE_URL=postgres://db/bot\n");

    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("interpreter: Python 3.12.1"))
        .stdout(predicate::str::contains("ready to launch"));
}

#[test]
#[serial]
fn test_check_never_installs_or_launches() {
    let project = BotProject::ready();

    project.cmd().arg("check").assert().success();

    let calls = project.calls();
    assert_eq!(calls.len(), 1, "{calls:?}");
    assert!(calls[0].ends_with("|--version"), "{calls:?}");
}

#[test]
#[serial]
fn test_check_missing_environment_fails() {
    let project = BotProject::empty();
    project.write("requirements.txt", "discord.py\n");
    project.write("main.py", "print('bot')\n");

    project
        .cmd()
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("virtual environment: not found"))
        .stderr(predicate::str::contains("python -m venv venv"))
        .stderr(predicate::str::contains("not ready to launch"));
}

#[test]
#[serial]
fn test_check_missing_dotenv_keys_warn_only() {
    let project = BotProject::ready();
    project.write(".env", "DISCORD_BOT_TOKEN=abc\n");

    project
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("dotenv: missing DATABASE_URL"));
}

#[test]
#[serial]
fn test_check_exported_key_satisfies_dotenv() {
    let project = BotProject::ready();
    project.write(".env", "DISCORD_BOT_TOKEN=abc\n");

    project
        .cmd()
        .env("DATABASE_URL", "postgres://db/bot")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("dotenv: missing").not())
        .stdout(predicate::str::contains("ready to launch"));
}
