//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Errors raised by the bootstrap sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Project root not found: {}\n\nSet it with: botstrap config set project_root <dir>", path.display())]
    ProjectRootMissing { path: PathBuf },

    #[error("Virtual environment not found at {}\n\nCreate it first:\n  {hint}", path.display())]
    EnvironmentMissing { path: PathBuf, hint: String },

    #[error("Dependency reconciliation failed: {reason}")]
    ReconcileFailed { reason: String },

    #[error("Launch halted before the program started.")]
    Halted,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
