//! Tests for the `config_service` application service.

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::Result;
use botstrap_cli::application::ports::ConfigStore;
use botstrap_cli::application::services::config_service::{load_config, set_value};
use botstrap_cli::domain::{ConfigError, LauncherConfig, ReconcilePolicy};
use botstrap_cli::infra::config::YamlConfigStore;

/// In-memory store that counts saves.
#[derive(Default)]
struct MemoryStore {
    config: RefCell<Option<LauncherConfig>>,
    saves: RefCell<u32>,
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<LauncherConfig> {
        Ok(self.config.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &LauncherConfig) -> Result<()> {
        *self.config.borrow_mut() = Some(config.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/memory/config.yaml"))
    }
}

#[test]
fn load_without_stored_config_returns_defaults() {
    let store = MemoryStore::default();
    let config = load_config(&store).expect("load");
    assert_eq!(config, LauncherConfig::default());
    assert_eq!(config.environment_dir, "venv");
    assert_eq!(config.entry_point, "main.py");
}

#[test]
fn set_value_persists_valid_assignment() {
    let store = MemoryStore::default();

    let updated = set_value(&store, "reconcile", "strict").expect("set");

    assert_eq!(updated.reconcile, ReconcilePolicy::Strict);
    assert_eq!(*store.saves.borrow(), 1);
    assert_eq!(
        load_config(&store).expect("load").reconcile,
        ReconcilePolicy::Strict
    );
}

#[test]
fn set_value_rejects_unknown_key_without_saving() {
    let store = MemoryStore::default();

    let err = set_value(&store, "python", "3.12").expect_err("should fail");

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
    assert_eq!(*store.saves.borrow(), 0);
}

#[test]
fn set_value_rejects_invalid_value_without_saving() {
    let store = MemoryStore::default();

    let err = set_value(&store, "hold_session", "maybe").expect_err("should fail");

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { .. })
    ));
    assert_eq!(*store.saves.borrow(), 0);
}

#[test]
fn set_value_keeps_other_settings() {
    let store = MemoryStore::default();
    set_value(&store, "entry_point", "bot.py").expect("first set");
    set_value(&store, "hold_session", "false").expect("second set");

    let config = load_config(&store).expect("load");
    assert_eq!(config.entry_point, "bot.py");
    assert!(!config.hold_session);
}

#[test]
fn yaml_store_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = YamlConfigStore::with_path(dir.path().join("nested").join("config.yaml"));

    set_value(&store, "required_env", "DISCORD_BOT_TOKEN, OWNER_ID").expect("set");

    let config = load_config(&store).expect("load");
    assert_eq!(config.required_env, vec!["DISCORD_BOT_TOKEN", "OWNER_ID"]);
    assert!(!dir.path().join("nested").join("config.yaml.tmp").exists());
}
