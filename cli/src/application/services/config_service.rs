//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::LauncherConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the stored config cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<LauncherConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the config cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &LauncherConfig) -> Result<()> {
    store.save(config)
}

/// Validate `key = value`, apply it to the stored config, and persist.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or on store I/O failure.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<LauncherConfig> {
    let mut config = load_config(store)?;
    config.apply(key, value)?;
    save_config(store, &config)?;
    Ok(config)
}
