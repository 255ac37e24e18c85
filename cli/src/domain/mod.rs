//! Domain layer: pure launcher logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod bootstrap;
pub mod config;
pub mod environment;
pub mod error;
pub mod preflight;

pub use bootstrap::{BootstrapOutcome, BootstrapState, Invocation, ReconcilePolicy, ReconcileStatus};
pub use config::{LauncherConfig, Overrides, Settings, validate_config_key, validate_config_value};
pub use environment::{ActivatedEnv, EnvLayout, creation_hint};
pub use error::{BootstrapError, ConfigError};
pub use preflight::{CheckItem, CheckStatus, PreflightReport};
