//! CLI argument parsing with clap derive

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Environment variable consulted when `--project-root` is absent. Empty counts as unset.
pub const PROJECT_ROOT_ENV: &str = "BOTSTRAP_PROJECT_ROOT";

/// Activate a project's virtual environment, sync its requirements, and launch it
#[derive(Parser)]
#[command(name = "botstrap", version, propagate_version = true)]
pub struct Cli {
    /// Project directory (falls back to $BOTSTRAP_PROJECT_ROOT, the configured root, then the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Activate the environment, install requirements, and launch the entry point
    Run(commands::run::RunArgs),

    /// Report whether the project is ready to launch, without changing anything
    Check,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

/// The `--project-root` flag, else a non-empty `BOTSTRAP_PROJECT_ROOT`.
fn project_root_override(flag: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails or the launch halts.
    pub async fn run(self) -> Result<()> {
        let Cli {
            project_root,
            quiet,
            no_color,
            verbose,
            command,
        } = self;

        crate::logging::init(verbose);

        let app = AppContext::new(AppFlags {
            output: OutputFlags { no_color, quiet },
            project_root: project_root_override(project_root, std::env::var_os(PROJECT_ROOT_ENV)),
        });

        match command.unwrap_or_else(|| Command::Run(commands::run::RunArgs::default())) {
            Command::Run(args) => commands::run::run(&args, &app).await,
            Command::Check => commands::check::run(&app).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => {
                commands::version::run();
                Ok(())
            }
        }
    }
}
