//! Configuration management for the armory CLI

use anyhow::{bail, Context, Result};
use armory::client::{
    DEFAULT_BASE_URL, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECS,
};
use armory::{ClientConfig, Realms, DEFAULT_REALM, DEFAULT_REALMS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Overrides;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub default_realm: String,
    pub realms: Vec<String>,
    pub timeout_secs: u64,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub items_db: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_realm: DEFAULT_REALM.to_string(),
            realms: DEFAULT_REALMS.iter().map(|r| r.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            items_db: PathBuf::from(armory_idb::DEFAULT_DB_PATH),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("armory");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Apply per-invocation flag and environment overrides
    ///
    /// The default realm must be one of the configured realms.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(realm) = &overrides.default_realm {
            match self.realms().resolve(realm) {
                Some(resolved) => self.default_realm = resolved,
                None => bail!(
                    "Unknown realm {}; expected one of: {}",
                    realm,
                    self.realms.join(", ")
                ),
            }
        }
        if let Some(db) = &overrides.items_db {
            self.items_db = db.clone();
        }
        Ok(self)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retries: self.retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn realms(&self) -> Realms {
        Realms::new(&self.realms)
    }
}
