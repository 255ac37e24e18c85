//! Application service: side-effect-free readiness check.
//!
//! Walks the same paths as the bootstrap sequence without installing or
//! launching anything.

use std::collections::HashMap;

use crate::application::ports::{CommandRunner, ProjectFs};
use crate::domain::preflight::missing_env_keys;
use crate::domain::{
    ActivatedEnv, CheckItem, EnvLayout, Invocation, PreflightReport, Settings, creation_hint,
};

pub const CHECK_PROJECT_ROOT: &str = "project root";
pub const CHECK_ENVIRONMENT: &str = "virtual environment";
pub const CHECK_INTERPRETER: &str = "interpreter";
pub const CHECK_MANIFEST: &str = "requirements";
pub const CHECK_ENTRY_POINT: &str = "entry point";
pub const CHECK_DOTENV: &str = "dotenv";

/// Build a readiness report for `settings`.
///
/// `inherited_env` is the environment the program would inherit; a required
/// key set there counts as present even when the dotenv file lacks it.
pub async fn run_preflight(
    fs: &impl ProjectFs,
    runner: &impl CommandRunner,
    settings: &Settings,
    layout: EnvLayout,
    inherited_env: &HashMap<String, String>,
) -> PreflightReport {
    let mut report = PreflightReport::default();
    let root = &settings.project_root;

    if !fs.is_dir(root) {
        report.push(CheckItem::fail(
            CHECK_PROJECT_ROOT,
            format!("{} is not a directory", root.display()),
        ));
        return report;
    }
    report.push(CheckItem::pass(CHECK_PROJECT_ROOT, root.display().to_string()));

    let env_dir = settings.environment_path();
    if fs.is_file(&layout.artifact_path(&env_dir)) {
        report.push(CheckItem::pass(CHECK_ENVIRONMENT, env_dir.display().to_string()));
        report.push(check_interpreter(fs, runner, &env_dir, layout).await);
    } else {
        report.push(CheckItem::fail(
            CHECK_ENVIRONMENT,
            format!(
                "not found at {} (create it with: {})",
                env_dir.display(),
                creation_hint(&settings.environment_dir)
            ),
        ));
    }

    report.push(required_file(fs, CHECK_MANIFEST, &settings.manifest_path()));
    report.push(required_file(fs, CHECK_ENTRY_POINT, &settings.entry_point_path()));
    report.push(check_dotenv(fs, settings, inherited_env));

    report
}

fn required_file(fs: &impl ProjectFs, name: &'static str, path: &std::path::Path) -> CheckItem {
    if fs.is_file(path) {
        CheckItem::pass(name, path.display().to_string())
    } else {
        CheckItem::fail(name, format!("{} not found", path.display()))
    }
}

async fn check_interpreter(
    fs: &impl ProjectFs,
    runner: &impl CommandRunner,
    env_dir: &std::path::Path,
    layout: EnvLayout,
) -> CheckItem {
    let env = match ActivatedEnv::activate(env_dir, layout, None) {
        Ok(env) => env,
        Err(e) => return CheckItem::fail(CHECK_INTERPRETER, format!("{e:#}")),
    };
    if !fs.is_file(&env.interpreter) {
        return CheckItem::fail(
            CHECK_INTERPRETER,
            format!("{} not found", env.interpreter.display()),
        );
    }

    let invocation = Invocation::new(&env.interpreter).arg("--version").within(&env);
    match runner.run_output(&invocation).await {
        Ok(output) if output.status.success() => {
            // Python 2 printed the version on stderr.
            let raw = if output.stdout.is_empty() { &output.stderr } else { &output.stdout };
            CheckItem::pass(CHECK_INTERPRETER, String::from_utf8_lossy(raw).trim().to_string())
        }
        Ok(output) => CheckItem::fail(
            CHECK_INTERPRETER,
            format!(
                "{} --version exited with {}",
                env.interpreter.display(),
                output.status
            ),
        ),
        Err(e) => CheckItem::fail(CHECK_INTERPRETER, format!("{e:#}")),
    }
}

fn check_dotenv(
    fs: &impl ProjectFs,
    settings: &Settings,
    inherited_env: &HashMap<String, String>,
) -> CheckItem {
    let exported = |key: &String| inherited_env.get(key).is_some_and(|v| !v.trim().is_empty());
    let path = settings.dotenv_path();
    if !fs.is_file(&path) {
        if settings.required_env.iter().all(exported) {
            return CheckItem::pass(CHECK_DOTENV, "required keys set in environment");
        }
        return CheckItem::warn(CHECK_DOTENV, format!("{} not found", path.display()));
    }

    let missing = fs
        .read_to_string(&path)
        .and_then(|content| missing_env_keys(&content, &settings.required_env));
    match missing {
        Ok(missing) => {
            let missing: Vec<String> = missing.into_iter().filter(|k| !exported(k)).collect();
            if missing.is_empty() {
                CheckItem::pass(CHECK_DOTENV, path.display().to_string())
            } else {
                CheckItem::warn(CHECK_DOTENV, format!("missing {}", missing.join(", ")))
            }
        }
        Err(e) => CheckItem::warn(CHECK_DOTENV, format!("{e:#}")),
    }
}
