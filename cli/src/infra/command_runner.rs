//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution.

use std::process::{ExitStatus, Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;
use crate::domain::Invocation;

/// Default timeout for captured commands (`python --version` and friends).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner`.
///
/// Foreground runs have no timeout: the launched program and the held shell
/// live as long as the operator wants. While one is running, Ctrl-C is
/// absorbed here so the terminal's interrupt reaches the child only and the
/// sequence carries on once it exits.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

fn command(invocation: &Invocation) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&invocation.program);
    cmd.args(&invocation.args);
    if let Some(dir) = &invocation.cwd {
        cmd.current_dir(dir);
    }
    for name in &invocation.removed {
        cmd.env_remove(name);
    }
    cmd.envs(invocation.vars.iter().map(|(k, v)| (k, v)));
    cmd
}

impl CommandRunner for TokioCommandRunner {
    async fn run_status(&self, invocation: &Invocation) -> Result<ExitStatus> {
        let program = invocation.program.display().to_string();
        tracing::debug!(
            command = %invocation.command_line(),
            cwd = ?invocation.cwd,
            "running in foreground"
        );

        let mut child = command(invocation)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        loop {
            tokio::select! {
                status = child.wait() => {
                    let status = status.with_context(|| format!("waiting for {program}"))?;
                    tracing::debug!(%status, "{program} exited");
                    return Ok(status);
                }
                signal = tokio::signal::ctrl_c() => {
                    signal.context("listening for interrupt")?;
                    tracing::debug!("interrupt received; waiting for {program} to exit");
                }
            }
        }
    }

    async fn run_output(&self, invocation: &Invocation) -> Result<Output> {
        let program = invocation.program.display().to_string();
        tracing::debug!(command = %invocation.command_line(), "running captured");

        let mut child = command(invocation)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", self.timeout.as_secs())
            }
        }
    }
}
