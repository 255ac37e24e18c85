//! Virtual environment layout and the activation context.
//!
//! Activation is modelled as data: `ActivatedEnv` carries the interpreter
//! path and the variable overrides that `activate` would have applied, and
//! every child invocation is built from it. The launcher's own process
//! environment is never touched.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// On-disk convention for a Python virtual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvLayout {
    /// `bin/activate`, `bin/python`
    Posix,
    /// `Scripts\activate.bat`, `Scripts\python.exe`
    Windows,
}

impl EnvLayout {
    /// Layout used by `python -m venv` on the current platform.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    #[must_use]
    pub const fn bin_dir_name(self) -> &'static str {
        match self {
            Self::Posix => "bin",
            Self::Windows => "Scripts",
        }
    }

    #[must_use]
    pub const fn activation_artifact_name(self) -> &'static str {
        match self {
            Self::Posix => "activate",
            Self::Windows => "activate.bat",
        }
    }

    #[must_use]
    pub const fn interpreter_name(self) -> &'static str {
        match self {
            Self::Posix => "python",
            Self::Windows => "python.exe",
        }
    }

    #[must_use]
    pub fn bin_dir(self, env_dir: &Path) -> PathBuf {
        env_dir.join(self.bin_dir_name())
    }

    /// The file whose presence marks `env_dir` as a usable environment.
    #[must_use]
    pub fn artifact_path(self, env_dir: &Path) -> PathBuf {
        self.bin_dir(env_dir).join(self.activation_artifact_name())
    }

    #[must_use]
    pub fn interpreter_path(self, env_dir: &Path) -> PathBuf {
        self.bin_dir(env_dir).join(self.interpreter_name())
    }
}

/// Command that creates the environment the launcher expects.
#[must_use]
pub fn creation_hint(environment_dir: &Path) -> String {
    format!("python -m venv {}", environment_dir.display())
}

/// An activated virtual environment, scoped to the invocations built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedEnv {
    pub env_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub interpreter: PathBuf,
    /// Variables set on every child process.
    pub vars: Vec<(OsString, OsString)>,
    /// Variables removed from every child process.
    pub removed: Vec<OsString>,
}

impl ActivatedEnv {
    /// Build the activation context for `env_dir`.
    ///
    /// Mirrors the `activate` script: `VIRTUAL_ENV` points at the
    /// environment, its bin directory is prepended to `inherited_path`,
    /// and `PYTHONHOME` is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the bin directory cannot be joined into a `PATH`
    /// value (it contains the platform's path separator).
    pub fn activate(
        env_dir: &Path,
        layout: EnvLayout,
        inherited_path: Option<&OsStr>,
    ) -> Result<Self> {
        let bin_dir = layout.bin_dir(env_dir);

        let mut entries = vec![bin_dir.clone()];
        if let Some(path) = inherited_path {
            entries.extend(std::env::split_paths(path));
        }
        let path = std::env::join_paths(entries)
            .with_context(|| format!("cannot add {} to PATH", bin_dir.display()))?;

        Ok(Self {
            env_dir: env_dir.to_path_buf(),
            interpreter: layout.interpreter_path(env_dir),
            bin_dir,
            vars: vec![
                (OsString::from("VIRTUAL_ENV"), env_dir.as_os_str().to_owned()),
                (OsString::from("PATH"), path),
            ],
            removed: vec![OsString::from("PYTHONHOME")],
        })
    }

    /// Value this context assigns to `name`, if any.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&OsStr> {
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_os_str())
    }
}
