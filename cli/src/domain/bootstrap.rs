//! Bootstrap state machine and child-process invocations.
//!
//! Pure types: the service in `application::services::bootstrap` drives the
//! transitions, and the infrastructure runner executes the invocations.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::config::VALID_RECONCILE_POLICIES;
use crate::domain::environment::ActivatedEnv;
use crate::domain::error::ConfigError;

// ── Reconcile policy ──────────────────────────────────────────────────────────

/// How a failed `pip install -r` affects the rest of the sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Warn and launch anyway.
    #[default]
    BestEffort,
    /// Halt before launching.
    Strict,
}

impl fmt::Display for ReconcilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BestEffort => "best-effort",
            Self::Strict => "strict",
        })
    }
}

impl FromStr for ReconcilePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best-effort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::InvalidValue {
                key: "reconcile".to_string(),
                value: s.to_string(),
                valid: VALID_RECONCILE_POLICIES.join(", "),
            }),
        }
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// States of one bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Start,
    DirectoryResolved,
    EnvironmentMissing,
    DiagnosticShown,
    Halted,
    EnvironmentFound,
    Activated,
    DependenciesReconciled,
    ProgramRunning,
    /// `code` is `None` when the program could not be spawned or was killed by a signal.
    ProgramExited { code: Option<i32> },
    SessionHeld,
}

impl BootstrapState {
    /// `Halted` and `SessionHeld` end the sequence; nothing follows them.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Halted | Self::SessionHeld)
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        use BootstrapState as S;
        matches!(
            (self, next),
            (S::Start, S::DirectoryResolved)
                | (S::DirectoryResolved, S::EnvironmentMissing | S::EnvironmentFound)
                | (S::EnvironmentMissing | S::Activated, S::DiagnosticShown)
                | (S::DiagnosticShown, S::Halted)
                | (S::EnvironmentFound, S::Activated)
                | (S::Activated, S::DependenciesReconciled)
                | (S::DependenciesReconciled, S::ProgramRunning)
                | (S::ProgramRunning, S::ProgramExited { .. })
                | (S::ProgramExited { .. }, S::SessionHeld)
        )
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::DirectoryResolved => f.write_str("directory-resolved"),
            Self::EnvironmentMissing => f.write_str("environment-missing"),
            Self::DiagnosticShown => f.write_str("diagnostic-shown"),
            Self::Halted => f.write_str("halted"),
            Self::EnvironmentFound => f.write_str("environment-found"),
            Self::Activated => f.write_str("activated"),
            Self::DependenciesReconciled => f.write_str("dependencies-reconciled"),
            Self::ProgramRunning => f.write_str("program-running"),
            Self::ProgramExited { code: Some(code) } => write!(f, "program-exited({code})"),
            Self::ProgramExited { code: None } => f.write_str("program-exited"),
            Self::SessionHeld => f.write_str("session-held"),
        }
    }
}

/// Result of the reconcile step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// Installer exited successfully.
    Satisfied,
    /// Installer failed or never ran; the sequence carried on.
    Failed { reason: String },
}

/// Everything a bootstrap run did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// Every state visited, starting with `Start`.
    pub trail: Vec<BootstrapState>,
    pub reconcile: Option<ReconcileStatus>,
}

impl Default for BootstrapOutcome {
    fn default() -> Self {
        Self {
            trail: vec![BootstrapState::Start],
            reconcile: None,
        }
    }
}

impl BootstrapOutcome {
    #[must_use]
    pub fn state(&self) -> BootstrapState {
        self.trail.last().copied().unwrap_or(BootstrapState::Start)
    }

    #[must_use]
    pub fn halted(&self) -> bool {
        self.state() == BootstrapState::Halted
    }

    #[must_use]
    pub fn visited(&self, state: BootstrapState) -> bool {
        self.trail.contains(&state)
    }

    /// Exit code of the launched program, if it ran and exited normally.
    #[must_use]
    pub fn program_exit_code(&self) -> Option<i32> {
        self.trail.iter().find_map(|s| match s {
            BootstrapState::ProgramExited { code } => *code,
            _ => None,
        })
    }

    /// Move to `next`. Illegal edges are a programming error.
    pub fn advance(&mut self, next: BootstrapState) {
        let current = self.state();
        debug_assert!(
            current.can_transition_to(next),
            "illegal bootstrap transition {current} -> {next}"
        );
        tracing::debug!(from = %current, to = %next, "bootstrap transition");
        self.trail.push(next);
    }
}

// ── Invocations ───────────────────────────────────────────────────────────────

/// One child process: program, arguments, working directory and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    pub vars: Vec<(OsString, OsString)>,
    pub removed: Vec<OsString>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            vars: Vec::new(),
            removed: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Apply the activation context's variables.
    #[must_use]
    pub fn within(mut self, env: &ActivatedEnv) -> Self {
        self.vars.extend(env.vars.iter().cloned());
        self.removed.extend(env.removed.iter().cloned());
        self
    }

    /// `<interpreter> -m pip install -r <manifest>` in the project root.
    #[must_use]
    pub fn pip_install(env: &ActivatedEnv, project_root: &Path, manifest: &Path) -> Self {
        Self::new(&env.interpreter)
            .arg("-m")
            .arg("pip")
            .arg("install")
            .arg("-r")
            .arg(manifest)
            .cwd(project_root)
            .within(env)
    }

    /// `<interpreter> <entry_point>` in the project root.
    #[must_use]
    pub fn launch(env: &ActivatedEnv, project_root: &Path, entry_point: &Path) -> Self {
        Self::new(&env.interpreter)
            .arg(entry_point)
            .cwd(project_root)
            .within(env)
    }

    /// Interactive shell in the project root with the environment active.
    #[must_use]
    pub fn shell(env: &ActivatedEnv, project_root: &Path, shell: &Path) -> Self {
        Self::new(shell).cwd(project_root).within(env)
    }

    /// Program and arguments as one display line.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
