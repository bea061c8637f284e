//! Client config load/save for `~/.pdf-qa/config.yaml`.
//!
//! The only setting the client needs is where the server lives. Resolution
//! order for the base URL: `PDF_QA_SERVER_URL` env var, then the config file,
//! then the stock local default.

use std::path::{Path, PathBuf};

/// Default server address when neither env nor config provide one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Env var overriding the base URL regardless of the config file.
pub const BASE_URL_ENV: &str = "PDF_QA_SERVER_URL";

/// Server section (base_url).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ServerSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Full config file schema.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSection,
}

/// Returns the default config file path: `~/.pdf-qa/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".pdf-qa").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file. Path is typically `~/.pdf-qa/config.yaml`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Io(e.to_string()))
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
    }
    let contents = serde_yaml::to_string(config).map_err(|e| ConfigError::Io(e.to_string()))?;
    std::fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))
}

/// Resolve the server base URL: env override, config file, stock default.
pub fn resolve_base_url(config: &Config) -> String {
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            return url;
        }
    }
    config
        .server
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Config load/save error.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(s) => write!(f, "IO error: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}
