//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`: never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::{Invocation, LauncherConfig};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run in the foreground with inherited stdio and wait for exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    /// A nonzero exit is not an error.
    async fn run_status(&self, invocation: &Invocation) -> Result<ExitStatus>;
    /// Run with captured output, bounded by the runner's timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or times out.
    async fn run_output(&self, invocation: &Invocation) -> Result<Output>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Read-only view of the project tree.
pub trait ProjectFs {
    fn is_dir(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

// ── Operator Port ─────────────────────────────────────────────────────────────

/// The person at the terminal.
pub trait Operator {
    /// Whether there is someone to prompt (stdin and stdout are terminals).
    fn is_interactive(&self) -> bool;
    /// Block until the operator presses a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn acknowledge(&self, prompt: &str) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a diagnostic the operator must act on. Never suppressed.
    fn error(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts launcher config persistence.
pub trait ConfigStore {
    /// Load the config, returning defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<LauncherConfig>;
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &LauncherConfig) -> Result<()>;
    /// # Errors
    ///
    /// Returns an error if no config location can be determined.
    fn path(&self) -> Result<PathBuf>;
}
