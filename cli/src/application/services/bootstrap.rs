//! Application service: the bootstrap-and-launch use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, Operator, ProgressReporter, ProjectFs};
use crate::domain::{
    ActivatedEnv, BootstrapError, BootstrapOutcome, BootstrapState, EnvLayout, Invocation,
    ReconcilePolicy, ReconcileStatus, Settings, creation_hint,
};

/// Prompt shown when the sequence halts.
pub const ACKNOWLEDGE_PROMPT: &str = "Press any key to continue . . .";

/// Inputs for one run that do not come from the config file.
pub struct BootstrapOptions<'a> {
    pub settings: &'a Settings,
    pub layout: EnvLayout,
    /// `PATH` inherited from the launcher's environment.
    pub inherited_path: Option<OsString>,
    /// Shell for the held session when `settings.shell` is unset.
    pub default_shell: PathBuf,
}

/// Run the bootstrap sequence to a terminal state.
///
/// Returns `Ok` for both terminal states; callers inspect
/// [`BootstrapOutcome::halted`]. Only a missing project root (and
/// operator I/O failures) surface as `Err`.
///
/// # Errors
///
/// Returns [`BootstrapError::ProjectRootMissing`] if the project root is not
/// a directory, or an error if the activation context cannot be built or the
/// operator prompt fails.
pub async fn run_bootstrap(
    fs: &impl ProjectFs,
    runner: &impl CommandRunner,
    operator: &impl Operator,
    reporter: &impl ProgressReporter,
    opts: &BootstrapOptions<'_>,
) -> Result<BootstrapOutcome> {
    let settings = opts.settings;
    let root = &settings.project_root;
    let mut outcome = BootstrapOutcome::default();

    // Step 1: Resolve project root.
    reporter.step(&format!("navigating to project root {}", root.display()));
    if !fs.is_dir(root) {
        return Err(BootstrapError::ProjectRootMissing { path: root.clone() }.into());
    }
    outcome.advance(BootstrapState::DirectoryResolved);

    // Step 2: Verify environment presence.
    reporter.step("checking for virtual environment...");
    let env_dir = settings.environment_path();
    if !fs.is_file(&opts.layout.artifact_path(&env_dir)) {
        outcome.advance(BootstrapState::EnvironmentMissing);
        let diagnostic = BootstrapError::EnvironmentMissing {
            path: env_dir,
            hint: creation_hint(&settings.environment_dir),
        };
        halt(operator, reporter, &mut outcome, &diagnostic.to_string())?;
        return Ok(outcome);
    }
    outcome.advance(BootstrapState::EnvironmentFound);

    // Step 3: Activate.
    reporter.step("activating virtual environment...");
    let env = ActivatedEnv::activate(&env_dir, opts.layout, opts.inherited_path.as_deref())?;
    tracing::debug!(interpreter = %env.interpreter.display(), "environment activated");
    outcome.advance(BootstrapState::Activated);

    // Step 4: Reconcile dependencies.
    match reconcile(fs, runner, reporter, settings, &env).await {
        Ok(()) => {
            reporter.success("requirements satisfied");
            outcome.reconcile = Some(ReconcileStatus::Satisfied);
        }
        Err(e) => {
            let reason = format!("{e:#}");
            outcome.reconcile = Some(ReconcileStatus::Failed { reason: reason.clone() });
            match settings.reconcile {
                ReconcilePolicy::BestEffort => {
                    reporter.warn(&format!("{reason}; launching anyway"));
                }
                ReconcilePolicy::Strict => {
                    halt(operator, reporter, &mut outcome, &reason)?;
                    return Ok(outcome);
                }
            }
        }
    }
    outcome.advance(BootstrapState::DependenciesReconciled);

    // Step 5: Launch.
    let entry = &settings.entry_point;
    reporter.step(&format!("running {}...", entry.display()));
    outcome.advance(BootstrapState::ProgramRunning);
    let code = match runner.run_status(&Invocation::launch(&env, root, entry)).await {
        Ok(status) => {
            if status.success() {
                reporter.success(&format!("{} exited", entry.display()));
            } else {
                reporter.warn(&format!("{} exited with {status}", entry.display()));
            }
            status.code()
        }
        Err(e) => {
            reporter.warn(&format!("could not run {}: {e:#}", entry.display()));
            None
        }
    };
    outcome.advance(BootstrapState::ProgramExited { code });

    // Step 6: Hold the session open.
    hold_session(runner, operator, reporter, opts, &env).await?;
    outcome.advance(BootstrapState::SessionHeld);

    Ok(outcome)
}

/// Run `pip install -r <manifest>` through the activated interpreter.
async fn reconcile(
    fs: &impl ProjectFs,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    settings: &Settings,
    env: &ActivatedEnv,
) -> Result<()> {
    let manifest = settings.manifest_path();
    if !fs.is_file(&manifest) {
        return Err(BootstrapError::ReconcileFailed {
            reason: format!("{} not found", manifest.display()),
        }
        .into());
    }

    reporter.step(&format!(
        "installing requirements from {}...",
        settings.manifest.display()
    ));
    let invocation = Invocation::pip_install(env, &settings.project_root, &settings.manifest);
    let status = runner
        .run_status(&invocation)
        .await
        .context("running pip")?;
    if !status.success() {
        return Err(BootstrapError::ReconcileFailed {
            reason: format!("pip exited with {status}"),
        }
        .into());
    }
    Ok(())
}

/// Show the diagnostic, wait for the operator, and stop.
fn halt(
    operator: &impl Operator,
    reporter: &impl ProgressReporter,
    outcome: &mut BootstrapOutcome,
    diagnostic: &str,
) -> Result<()> {
    reporter.error(diagnostic);
    outcome.advance(BootstrapState::DiagnosticShown);
    if operator.is_interactive() {
        operator.acknowledge(ACKNOWLEDGE_PROMPT)?;
    }
    outcome.advance(BootstrapState::Halted);
    Ok(())
}

async fn hold_session(
    runner: &impl CommandRunner,
    operator: &impl Operator,
    reporter: &impl ProgressReporter,
    opts: &BootstrapOptions<'_>,
    env: &ActivatedEnv,
) -> Result<()> {
    let settings = opts.settings;
    if !settings.hold_session {
        reporter.step("session hold disabled; exiting");
        return Ok(());
    }
    if !operator.is_interactive() {
        reporter.step("not attached to a terminal; skipping interactive session");
        return Ok(());
    }

    let shell = settings.shell.as_ref().unwrap_or(&opts.default_shell);
    reporter.step(&format!(
        "opening {} in {} (exit the shell to close)",
        shell.display(),
        settings.project_root.display()
    ));
    let invocation = Invocation::shell(env, &settings.project_root, shell);
    if let Err(e) = runner.run_status(&invocation).await {
        reporter.warn(&format!("could not open {}: {e:#}", shell.display()));
        operator.acknowledge(ACKNOWLEDGE_PROMPT)?;
    }
    Ok(())
}
