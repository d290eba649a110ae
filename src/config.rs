//! Configuration management for ouilookup.
//!
//! Settings come from an optional YAML file; command-line flags override
//! individual values afterwards.
//!
//! ```yaml
//! url: https://standards-oui.ieee.org/oui.txt
//! outfile: /var/cache/ouilookup/oui.txt
//! max_age: 2592000      # seconds, 0 disables the age check
//! timeout_secs: 30
//! force_update: false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::TIMEOUT_SECS;
use crate::loader::{default_outfile, LoaderConfig, DEFAULT_MAX_AGE_SECS, DEFAULT_URL};
use crate::validation::validate_url;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry source URL
    pub url: String,

    /// Local copy of the registry
    pub outfile: PathBuf,

    /// Maximum age of the local copy in seconds (0 or negative: never expire)
    pub max_age: i64,

    /// HTTP connect timeout in seconds; a whole download may take ten times this
    pub timeout_secs: u64,

    /// Always download, regardless of age
    pub force_update: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            outfile: default_outfile(),
            max_age: DEFAULT_MAX_AGE_SECS,
            timeout_secs: TIMEOUT_SECS,
            force_update: false,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.url)?;

        if self.outfile.as_os_str().is_empty() {
            anyhow::bail!("outfile cannot be empty");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        Ok(())
    }

    /// Save configuration to YAML file atomically
    ///
    /// Uses tempfile + rename pattern to prevent corruption on crash.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        let parent_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for config")?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }

    /// Settings for the registry loader.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            url: self.url.clone(),
            outfile: self.outfile.clone(),
            max_age: self.max_age,
            force: self.force_update,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
