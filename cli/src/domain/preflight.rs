//! Preflight report types for `botstrap check`.

use anyhow::{Context, Result};

/// Outcome of one preflight item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    /// Advisory only; does not block a launch.
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckItem {
    #[must_use]
    pub fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Pass, detail: detail.into() }
    }

    #[must_use]
    pub fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Warn, detail: detail.into() }
    }

    #[must_use]
    pub fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self { name, status: CheckStatus::Fail, detail: detail.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightReport {
    pub checks: Vec<CheckItem>,
}

impl PreflightReport {
    pub fn push(&mut self, item: CheckItem) {
        self.checks.push(item);
    }

    /// True when nothing failed. Warnings do not count.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.checks.iter().all(|c| c.status != CheckStatus::Fail)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CheckItem> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Required keys that are absent or empty in dotenv `content`.
///
/// # Errors
///
/// Returns an error if the content is not valid dotenv syntax.
pub fn missing_env_keys(content: &str, required: &[String]) -> Result<Vec<String>> {
    let mut present = Vec::new();
    for entry in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = entry.context("invalid dotenv syntax")?;
        if !value.trim().is_empty() {
            present.push(key);
        }
    }
    Ok(required
        .iter()
        .filter(|k| !present.contains(k))
        .cloned()
        .collect())
}
