//! `botstrap run`: activate, reconcile, launch, hold the session open.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::bootstrap::{self as service, BootstrapOptions};
use crate::domain::{BootstrapError, EnvLayout};
use crate::infra::operator::default_shell;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Exit after the program instead of opening a shell
    #[arg(long)]
    pub no_hold: bool,

    /// Halt without launching if installing requirements fails
    #[arg(long)]
    pub strict: bool,
}

/// Run `botstrap run`.
///
/// # Errors
///
/// Returns an error if the project root is missing, or
/// [`BootstrapError::Halted`] if the sequence stopped before launching.
pub async fn run(args: &RunArgs, app: &AppContext) -> Result<()> {
    let settings = app.settings(args.strict, args.no_hold)?;
    let opts = BootstrapOptions {
        settings: &settings,
        layout: EnvLayout::host(),
        inherited_path: std::env::var_os("PATH"),
        default_shell: default_shell(),
    };
    let reporter = app.terminal_reporter();

    let outcome =
        service::run_bootstrap(&app.fs, &app.runner, &app.operator, &reporter, &opts).await?;
    tracing::debug!(trail = ?outcome.trail, "bootstrap finished");

    if outcome.halted() {
        return Err(BootstrapError::Halted.into());
    }
    Ok(())
}
