//! Configuration types.
//!
//! Configuration lives in `config.toml` under the Hearth config directory.
//! Every field has a default, so a missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime configuration for the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Quiet period after the last keystroke before a search runs.
    pub debounce_ms: u64,

    /// Maximum rows shown for a non-empty query.
    pub max_results: usize,

    /// Maximum matches requested per entity type.
    pub per_type_limit: usize,

    /// Upper bound on a single search round trip.
    pub search_timeout_ms: u64,

    /// Recent items settings.
    pub recent: RecentConfig,

    /// Hotkey configuration.
    pub hotkey: HotkeyConfig,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            max_results: 8,
            per_type_limit: 5,
            search_timeout_ms: 5_000,
            recent: RecentConfig::default(),
            hotkey: HotkeyConfig::default(),
        }
    }
}

impl PaletteConfig {
    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Search timeout as a duration.
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }
}

/// Recent items configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentConfig {
    /// Maximum number of stored recent items.
    pub capacity: usize,

    /// Number of items returned by a load.
    pub load_limit: usize,

    /// Number of items shown above quick actions for an empty query.
    pub empty_query_limit: usize,

    /// Storage key for the serialized list.
    pub storage_key: String,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            load_limit: 5,
            empty_query_limit: 3,
            storage_key: "hearth.palette.recent".to_string(),
        }
    }
}

/// Hotkey configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Toggle hotkey string, e.g., "cmd+k"
    pub toggle: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            toggle: "cmd+k".to_string(),
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hearth"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Get the data directory used for persisted palette state.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hearth"))
}
