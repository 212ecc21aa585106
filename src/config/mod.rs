//! Client configuration persisted under the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::InquiryError;

const CONFIG_DIR: &str = "inquiry_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Environment override for the backend base URL, used by scripted runs and
/// the test harness.
pub const API_URL_ENV: &str = "INQUIRY_API_URL";
/// Environment override for the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "INQUIRY_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:1337".into(),
            request_timeout_secs: 10,
            locale: "en-US".into(),
        }
    }
}

impl Config {
    /// Applies environment overrides on top of the persisted values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            if let Ok(value) = secs.trim().parse::<u64>() {
                self.request_timeout_secs = value.max(1);
            }
        }
        self
    }
}

/// Loads and saves the configuration file, writing atomically via a staged
/// temporary file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, InquiryError> {
        let base = dirs::config_dir()
            .ok_or_else(|| InquiryError::Config("no config directory available".into()))?
            .join(CONFIG_DIR);
        Self::from_base(base)
    }

    /// Anchors the manager under an explicit directory. Used by tests and by
    /// deployments that relocate the config root.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, InquiryError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, InquiryError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, InquiryError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), InquiryError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<(), InquiryError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
