//! Domain types and validators for launcher configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::bootstrap::ReconcilePolicy;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "project_root",
    "environment_dir",
    "manifest",
    "entry_point",
    "reconcile",
    "hold_session",
    "shell",
    "dotenv",
    "required_env",
];
pub const VALID_RECONCILE_POLICIES: &[&str] = &["best-effort", "strict"];
pub const VALID_BOOLEANS: &[&str] = &["true", "false"];

/// Keys the launched bot refuses to start without.
pub const DEFAULT_REQUIRED_ENV: &[&str] = &["DISCORD_BOT_TOKEN", "DATABASE_URL"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Configuration stored in `<config dir>/botstrap/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Absolute path of the project to launch. Falls back to the current directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
    /// Virtual environment directory, relative to the project root.
    pub environment_dir: String,
    /// Dependency manifest handed to `pip install -r`.
    pub manifest: String,
    /// Script run with the environment's interpreter.
    pub entry_point: String,
    /// What to do when dependency reconciliation fails.
    pub reconcile: ReconcilePolicy,
    /// Open an interactive shell after the program exits.
    pub hold_session: bool,
    /// Shell used for the held session. Defaults to `$SHELL` / `%COMSPEC%`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Dotenv file read by the launched program, relative to the project root.
    pub dotenv: String,
    /// Keys `botstrap check` expects to find in the dotenv file.
    pub required_env: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            project_root: None,
            environment_dir: "venv".to_string(),
            manifest: "requirements.txt".to_string(),
            entry_point: "main.py".to_string(),
            reconcile: ReconcilePolicy::default(),
            hold_session: true,
            shell: None,
            dotenv: ".env".to_string(),
            required_env: DEFAULT_REQUIRED_ENV.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

impl LauncherConfig {
    /// Key/value pairs in display order, unset optionals shown as `(unset)`.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let unset = || "(unset)".to_string();
        vec![
            (
                "project_root",
                self.project_root
                    .as_ref()
                    .map_or_else(unset, |p| p.display().to_string()),
            ),
            ("environment_dir", self.environment_dir.clone()),
            ("manifest", self.manifest.clone()),
            ("entry_point", self.entry_point.clone()),
            ("reconcile", self.reconcile.to_string()),
            ("hold_session", self.hold_session.to_string()),
            ("shell", self.shell.clone().unwrap_or_else(unset)),
            ("dotenv", self.dotenv.clone()),
            ("required_env", self.required_env.join(",")),
        ]
    }

    /// Validate and apply a single `key = value` assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;

        match key {
            "project_root" => self.project_root = Some(PathBuf::from(value)),
            "environment_dir" => self.environment_dir = value.to_string(),
            "manifest" => self.manifest = value.to_string(),
            "entry_point" => self.entry_point = value.to_string(),
            "reconcile" => self.reconcile = value.parse()?,
            "hold_session" => self.hold_session = value == "true",
            "shell" => self.shell = Some(value.to_string()),
            "dotenv" => self.dotenv = value.to_string(),
            "required_env" => self.required_env = split_env_keys(value),
            _ => unreachable!("key validated above"),
        }
        Ok(())
    }
}

fn split_env_keys(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect()
}

// ── Resolved settings ────────────────────────────────────────────────────────

/// Per-invocation overrides coming from flags and environment variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--project-root` / `BOTSTRAP_PROJECT_ROOT`.
    pub project_root: Option<PathBuf>,
    /// `--strict`: halt when reconciliation fails.
    pub strict: bool,
    /// `--no-hold`: exit after the program instead of opening a shell.
    pub no_hold: bool,
}

/// Fully resolved launcher settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_root: PathBuf,
    pub environment_dir: PathBuf,
    pub manifest: PathBuf,
    pub entry_point: PathBuf,
    pub reconcile: ReconcilePolicy,
    pub hold_session: bool,
    pub shell: Option<PathBuf>,
    pub dotenv: PathBuf,
    pub required_env: Vec<String>,
}

impl Settings {
    /// Merge the stored config with overrides.
    ///
    /// Project root precedence: override, then config file, then `cwd`.
    /// A relative root is taken relative to `cwd`.
    #[must_use]
    pub fn resolve(config: &LauncherConfig, overrides: &Overrides, cwd: &Path) -> Self {
        let root = overrides
            .project_root
            .clone()
            .or_else(|| config.project_root.clone())
            .map_or_else(|| cwd.to_path_buf(), |p| cwd.join(p));

        let reconcile = if overrides.strict {
            ReconcilePolicy::Strict
        } else {
            config.reconcile
        };

        Self {
            project_root: root,
            environment_dir: PathBuf::from(&config.environment_dir),
            manifest: PathBuf::from(&config.manifest),
            entry_point: PathBuf::from(&config.entry_point),
            reconcile,
            hold_session: config.hold_session && !overrides.no_hold,
            shell: config.shell.as_ref().map(PathBuf::from),
            dotenv: PathBuf::from(&config.dotenv),
            required_env: config.required_env.clone(),
        }
    }

    #[must_use]
    pub fn environment_path(&self) -> PathBuf {
        self.project_root.join(&self.environment_dir)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_root.join(&self.manifest)
    }

    #[must_use]
    pub fn entry_point_path(&self) -> PathBuf {
        self.project_root.join(&self.entry_point)
    }

    #[must_use]
    pub fn dotenv_path(&self) -> PathBuf {
        self.project_root.join(&self.dotenv)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |valid: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid: valid.to_string(),
        }
        .into()
    };

    match key {
        "reconcile" if !VALID_RECONCILE_POLICIES.contains(&value) => {
            Err(invalid(&VALID_RECONCILE_POLICIES.join(", ")))
        }
        "hold_session" if !VALID_BOOLEANS.contains(&value) => {
            Err(invalid(&VALID_BOOLEANS.join(", ")))
        }
        "project_root" if value.is_empty() || !Path::new(value).is_absolute() => {
            Err(invalid("an absolute directory path"))
        }
        "environment_dir" | "manifest" | "entry_point" | "dotenv"
            if value.is_empty() || Path::new(value).is_absolute() =>
        {
            Err(invalid("a path relative to project_root"))
        }
        "shell" if value.trim().is_empty() => Err(invalid("a shell executable")),
        "required_env" if !split_env_keys(value).iter().all(|k| is_env_key(k)) => {
            Err(invalid("comma-separated variable names, e.g. DISCORD_BOT_TOKEN,DATABASE_URL"))
        }
        _ => Ok(()),
    }
}

fn is_env_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ── Unit tests ───────────────────────────────────────────────────────────────
