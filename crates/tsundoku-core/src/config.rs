use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Default fetch-all pagination guard. Policy, not a business rule; both
/// the config file and `--page-cap` can change it.
pub const DEFAULT_PAGE_CAP: usize = 20;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mal: MalSection,
}

/// MyAnimeList credentials and fetch policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalSection {
    pub client_id: Option<String>,
    pub username: Option<String>,
    #[serde(default = "default_page_cap")]
    pub page_cap: usize,
}

fn default_page_cap() -> usize {
    DEFAULT_PAGE_CAP
}

impl Default for MalSection {
    fn default() -> Self {
        Self {
            client_id: None,
            username: None,
            page_cap: DEFAULT_PAGE_CAP,
        }
    }
}

impl AppConfig {
    /// Load config: the user file if present, built-in defaults otherwise,
    /// with `MAL_CLIENT_ID` / `MAL_USERNAME` environment overrides applied
    /// on top.
    pub fn load() -> Result<Self, CoreError> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self, CoreError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            let user_str = std::fs::read_to_string(&user_path)?;
            let config =
                toml::from_str(&user_str).map_err(|e| CoreError::Config(e.to_string()))?;
            tracing::debug!(path = %user_path.display(), "loaded user config");
            Ok(config)
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))
        }
    }

    /// Apply environment overrides through the given lookup; non-empty
    /// values win over the file.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(id) = var("MAL_CLIENT_ID").filter(|v| !v.is_empty()) {
            self.mal.client_id = Some(id);
        }
        if let Some(name) = var("MAL_USERNAME").filter(|v| !v.is_empty()) {
            self.mal.username = Some(name);
        }
    }

    /// Write the built-in defaults to the user config path. Refuses to
    /// overwrite an existing file.
    pub fn write_default() -> Result<PathBuf, CoreError> {
        let path = Self::config_path();
        if path.exists() {
            return Err(CoreError::Config(format!(
                "config already exists at {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, DEFAULT_CONFIG)?;
        Ok(path)
    }

    /// Path to the user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "tsundoku")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
