//! Filesystem infrastructure: implements `ProjectFs` over `std::fs`.

use std::path::Path;

use anyhow::{Context, Result};

/// Production filesystem implementation of `ProjectFs`.
pub struct LocalFs;

impl crate::application::ports::ProjectFs for LocalFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
