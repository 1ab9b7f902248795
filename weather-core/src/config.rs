use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::WeatherError, model::ForecastDays, view::UnitSystem};

/// Environment variable holding the WeatherAPI.com key.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

const PLACEHOLDER_KEY: &str = "YOUR_API_KEY_HERE";

/// Read the API key from [`API_KEY_ENV`].
///
/// The key is never read from or written to the config file.
pub fn api_key_from_env() -> Result<String, WeatherError> {
    let key = std::env::var(API_KEY_ENV).unwrap_or_default();
    validate_api_key(&key)?;
    Ok(key)
}

pub(crate) fn validate_api_key(key: &str) -> Result<(), WeatherError> {
    let key = key.trim();
    if key.is_empty() || key == PLACEHOLDER_KEY {
        return Err(WeatherError::MissingApiKey);
    }
    Ok(())
}

/// User preferences stored on disk.
///
/// Example TOML:
/// default_query = "London"
/// default_days = 3
/// use_fahrenheit = false
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_query: String,
    pub default_days: ForecastDays,
    pub use_fahrenheit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_query: "New York".to_string(),
            default_days: ForecastDays::default(),
            use_fahrenheit: false,
        }
    }
}

impl Config {
    pub fn units(&self) -> UnitSystem {
        UnitSystem::from_fahrenheit_flag(self.use_fahrenheit)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
