//! Terminal implementation of the `Operator` port, plus shell discovery.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::Term;

use crate::application::ports::Operator;

/// Operator reached through the controlling terminal.
pub struct TerminalOperator {
    term: Term,
    interactive: bool,
}

impl TerminalOperator {
    /// Detect whether stdin and stdout are both attached to a terminal.
    #[must_use]
    pub fn detect() -> Self {
        let term = Term::stderr();
        let interactive = std::io::stdin().is_terminal() && Term::stdout().is_term();
        Self { term, interactive }
    }
}

impl Operator for TerminalOperator {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn acknowledge(&self, prompt: &str) -> Result<()> {
        self.term
            .write_str(prompt)
            .context("writing prompt")?;
        self.term.read_key().context("waiting for a key press")?;
        self.term.write_line("").context("writing prompt")?;
        Ok(())
    }
}

/// Shell for the held session: `$SHELL` or `/bin/sh` on Unix,
/// `%COMSPEC%` or `cmd.exe` on Windows.
#[must_use]
pub fn default_shell() -> PathBuf {
    let (var, fallback) = if cfg!(windows) {
        ("COMSPEC", "cmd.exe")
    } else {
        ("SHELL", "/bin/sh")
    };
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
}
