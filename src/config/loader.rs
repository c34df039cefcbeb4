//! Configuration Loader
//!
//! Loads client settings from a JSON file, with an environment override for
//! the API key applied after parsing.

use crate::config::settings::ClientConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Loads and resolves a [`ClientConfig`]
#[derive(Debug)]
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Load configuration from a specific file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::read_file(path.as_ref())?;
        config.apply_env_overrides();

        Ok(Self { config })
    }

    /// Load configuration from the first default path that exists
    pub fn discover() -> Result<Self> {
        let _ = dotenvy::dotenv();

        for path in Self::default_paths() {
            if path.exists() {
                let mut config = Self::read_file(&path)?;
                config.apply_env_overrides();
                return Ok(Self { config });
            }
        }

        Err(Error::Config(
            "no config file found; set ROUTERCHAT_CONFIG or create routerchat.json".to_string(),
        ))
    }

    /// Ordered list of config paths to check
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Environment variable
        if let Ok(custom_path) = std::env::var("ROUTERCHAT_CONFIG") {
            paths.push(PathBuf::from(custom_path));
        }

        // 2. Current directory
        paths.push(PathBuf::from("routerchat.json"));

        // 3. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("routerchat").join("config.json"));
        }

        // 4. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".routerchat").join("config.json"));
        }

        paths
    }

    fn read_file(path: &Path) -> Result<ClientConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Borrow the resolved configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Take ownership of the resolved configuration
    pub fn into_config(self) -> ClientConfig {
        self.config
    }
}
