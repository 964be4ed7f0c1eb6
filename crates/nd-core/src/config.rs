//! Configuration system for the nes-deck driver

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DeckError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub cartridge: CartridgeConfig,
    pub session: SessionConfig,
}

/// Preimage fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL of the content server (`GET {base_url}/preimages/{hash}`)
    pub base_url: String,
    /// Local preimage directory, used instead of HTTP when set
    pub preimage_dir: Option<PathBuf>,
    /// Verify that fetched bytes hash to the requested digest
    pub verify_preimages: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            preimage_dir: None,
            verify_preimages: false,
        }
    }
}

/// Cartridge selection, as hex hash strings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CartridgeConfig {
    pub static_hash: String,
    pub dyn_hash: String,
}

/// Session timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed inter-tick delay in milliseconds (placeholder cadence, not a
    /// frame-rate scheduler)
    pub tick_delay_ms: u64,
    /// Activity poll interval in milliseconds
    pub poll_interval_ms: u64,
    pub start_paused: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_delay_ms: 1000,
            poll_interval_ms: 5000,
            start_paused: false,
        }
    }
}

impl Config {
    /// Load configuration from the given path, or from the default location
    /// when `None`. A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path(),
        };

        if path.exists() {
            tracing::debug!(path = %path.display(), "loading configuration");
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| DeckError::Config(e.to_string()))
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| DeckError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nes-deck")
            .join("config.toml")
    }
}
