//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the catalog endpoint, the theme preference, and where
//! local data is kept.
//!
//! Configuration is stored at `~/.config/creaturedex/config.json`.
//! `CREATUREDEX_CATALOG_URL` and `CREATUREDEX_DATA_DIR` override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{DEFAULT_CATALOG_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Application name used for config/data directory paths
pub const APP_NAME: &str = "creaturedex";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const CATALOG_URL_ENV: &str = "CREATUREDEX_CATALOG_URL";
pub const DATA_DIR_ENV: &str = "CREATUREDEX_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog_url: Option<String>,
    pub dark_mode: bool,
    pub data_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    /// PIN standing in for biometrics on front ends without a sensor.
    pub capture_pin: Option<String>,
    pub log_to_file: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Persist the theme preference alone.
    ///
    /// Writes go through the stored file rather than `self`, so environment
    /// and command-line overrides never end up on disk. A file that cannot
    /// be read is left untouched.
    pub fn store_dark_mode(dark_mode: bool) -> Result<()> {
        Self::store_dark_mode_to(&Self::config_path()?, dark_mode)
    }

    pub fn store_dark_mode_to(path: &Path, dark_mode: bool) -> Result<()> {
        let mut stored = Self::load_from(path)
            .context("Refusing to overwrite a config file that could not be read")?;
        if stored.dark_mode == dark_mode {
            return Ok(());
        }
        stored.dark_mode = dark_mode;
        stored.save_to(path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply environment overrides on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(CATALOG_URL_ENV) {
            if !url.trim().is_empty() {
                self.catalog_url = Some(url);
            }
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    pub fn catalog_url(&self) -> &str {
        self.catalog_url.as_deref().unwrap_or(DEFAULT_CATALOG_URL)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Directory holding the key-value store and log files.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn store_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("store"))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}
