//! Application context: unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()`; commands receive `&AppContext` and pull
//! the port implementations they need from it.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::services::config_service;
use crate::domain::config::{Overrides, Settings};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::infra::operator::TerminalOperator;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// `--project-root` / `BOTSTRAP_PROJECT_ROOT`.
    pub project_root: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Child process runner.
    pub runner: TokioCommandRunner,
    /// Project filesystem probe.
    pub fs: LocalFs,
    /// The person at the terminal.
    pub operator: TerminalOperator,
    /// Launcher config file.
    pub config_store: YamlConfigStore,
    /// Project root override from the command line or environment.
    pub project_root: Option<PathBuf>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            runner: TokioCommandRunner::default(),
            fs: LocalFs,
            operator: TerminalOperator::detect(),
            config_store: YamlConfigStore::default(),
            project_root: flags.project_root,
        }
    }

    /// Progress reporter writing to this context's terminal output.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Resolve settings from the config file, the project root override,
    /// and the per-command flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the current
    /// directory cannot be determined.
    pub fn settings(&self, strict: bool, no_hold: bool) -> Result<Settings> {
        let config = config_service::load_config(&self.config_store)?;
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let overrides = Overrides {
            project_root: self.project_root.clone(),
            strict,
            no_hold,
        };
        let settings = Settings::resolve(&config, &overrides, &cwd);
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }
}
