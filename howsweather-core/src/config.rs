use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::error::WeatherError;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["OPENWEATHER_API_KEY", "API_KEY"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// OpenWeather API key. The environment takes precedence over this.
    pub api_key: Option<String>,

    /// Override for the OpenWeather host, mostly useful against a mock server.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "howsweather", "howsweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// API key from the process environment, falling back to the file.
    pub fn api_key(&self) -> Result<String, WeatherError> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn api_key_with<F>(&self, lookup: F) -> Result<String, WeatherError>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }
}
