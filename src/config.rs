//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default Azure DevOps REST endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://dev.azure.com";

/// Default endpoint serving the user profile
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://vssps.dev.azure.com";

/// Default network timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build-service identities that are added as reviewers automatically
pub const DEFAULT_IGNORED_REVIEWER_IDS: &[&str] = &[
    "1809cf47-1683-62b4-ab66-9dbfd3d291d6",
    "59e23168-dd18-4b40-9065-f3182d63ff1a",
];

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Reviewer ids never shown in the reviewer table
    pub ignored_reviewer_ids: Option<Vec<String>>,
    /// Timeout applied to every network call
    pub request_timeout_secs: Option<u64>,
    /// Base URL for repository and pull request listing
    pub api_base_url: Option<String>,
    /// Base URL for the profile lookup
    pub profile_base_url: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "ado-review", "ado-review-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file gives the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is unreadable
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable config file: {err}");
            Self::default()
        })
    }

    pub fn ignored_reviewer_ids(&self) -> HashSet<String> {
        match &self.ignored_reviewer_ids {
            Some(ids) => ids.iter().cloned().collect(),
            None => DEFAULT_IGNORED_REVIEWER_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }

    /// Network timeout; zero means the default
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn profile_base_url(&self) -> &str {
        self.profile_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PROFILE_BASE_URL)
    }
}
