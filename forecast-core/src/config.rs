use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::freshness::DEFAULT_COOLDOWN_MINUTES;
use crate::location::{DEFAULT_GEOCODING_URL, Place};
use crate::provider::open_meteo::DEFAULT_FORECAST_URL;
use crate::units::UserUnitPreference;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// dark_theme = false
/// cooldown_minutes = 15
///
/// [units]
/// use_fahrenheit = false
/// use_miles = false
/// use_inches = false
/// locale = "fi"
///
/// [home]
/// name = "Tampere"
/// country = "Finland"
/// coordinate = { latitude = 61.49911, longitude = 23.78712 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub units: UserUnitPreference,

    pub dark_theme: bool,

    /// Minutes a fetched snapshot is reused before refetching.
    pub cooldown_minutes: u32,

    /// Saved location used when no city is given.
    pub home: Option<Place>,

    /// Override for the forecast API, mainly for tests and mirrors.
    pub forecast_base_url: Option<String>,

    pub geocoding_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: UserUnitPreference::default(),
            dark_theme: false,
            cooldown_minutes: DEFAULT_COOLDOWN_MINUTES as u32,
            home: None,
            forecast_base_url: None,
            geocoding_base_url: None,
        }
    }
}

impl Config {
    pub fn cooldown(&self) -> Duration {
        Duration::minutes(i64::from(self.cooldown_minutes))
    }

    pub fn forecast_url(&self) -> &str {
        self.forecast_base_url.as_deref().unwrap_or(DEFAULT_FORECAST_URL)
    }

    pub fn geocoding_url(&self) -> &str {
        self.geocoding_base_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL)
    }

    /// Replace the user-facing settings in one step, as the settings dialog's "apply" does.
    pub fn apply(&mut self, units: UserUnitPreference, dark_theme: bool, cooldown_minutes: u32) {
        self.units = units;
        self.dark_theme = dark_theme;
        self.cooldown_minutes = cooldown_minutes;
    }

    pub fn set_home(&mut self, place: Option<Place>) {
        self.home = place;
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the persisted last snapshot.
    pub fn cache_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.cache_dir().join("snapshot.json"))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("fi", "sulku", "forecast")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
