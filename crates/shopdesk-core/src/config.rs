//! Shopdesk config — serde structs for ~/.shopdesk/config.json
//!
//! Pure types and resolution only. Environment variables and CLI flags win
//! over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables consulted for the API base URL, in priority order.
pub const BASE_URL_ENV_VARS: &[&str] = &["SHOPDESK_API_URL", "API_URL"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopdeskConfig {
    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(rename = "sessionFile", skip_serializing_if = "Option::is_none")]
    pub session_file: Option<String>,
}

impl ShopdeskConfig {
    /// Load from a specific path. Missing or malformed files yield defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Strict variant of [`ShopdeskConfig::load`] for callers that named the file explicitly.
    pub fn load_strict(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Discover from ~/.shopdesk/config.json.
    pub fn discover() -> Self {
        Self::load(&Self::default_path())
    }

    /// Default path: ~/.shopdesk/config.json
    pub fn default_path() -> PathBuf {
        shopdesk_home().join("config.json")
    }

    /// Session file from config, or ~/.shopdesk/session.json
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| shopdesk_home().join("session.json"))
    }

    /// Resolve the API base URL against the process environment.
    pub fn resolve_base_url(&self, explicit: Option<&str>) -> Option<String> {
        self.resolve_base_url_with(explicit, |name| std::env::var(name).ok())
    }

    /// Resolve the API base URL: explicit override, then [`BASE_URL_ENV_VARS`],
    /// then the file. Empty values count as absent. `None` means unconfigured.
    pub fn resolve_base_url_with<F>(&self, explicit: Option<&str>, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        explicit
            .map(str::to_string)
            .into_iter()
            .chain(BASE_URL_ENV_VARS.iter().filter_map(|name| env(*name)))
            .chain(self.base_url.clone())
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
    }
}

fn shopdesk_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".shopdesk")
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
