//! Startup configuration read from `config.json` in the per-user config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::image_data::ImageLimits;
use crate::core::paths::app_config_root;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f64,
    pub window_height: f64,
    /// Directory holding `male.json`/`female.json`; bundled `models/` when unset.
    pub models_dir: Option<PathBuf>,
    /// Overrides `<config dir>/preferences.json`.
    pub preferences_file: Option<PathBuf>,
    pub max_image_dimension: u32,
    pub max_image_bytes: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let limits = ImageLimits::default();
        Self {
            window_width: 1280.0,
            window_height: 800.0,
            models_dir: None,
            preferences_file: None,
            max_image_dimension: limits.max_dimension,
            max_image_bytes: limits.max_bytes,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the user's config, falling back to defaults on any error.
    ///
    /// The error is handed back so it can be logged once tracing is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        Self::load_or_default(&app_config_root().join("config.json"))
    }

    fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_file
            .clone()
            .unwrap_or_else(|| app_config_root().join("preferences.json"))
    }

    pub fn image_limits(&self) -> ImageLimits {
        ImageLimits {
            max_dimension: self.max_image_dimension.max(1),
            max_bytes: self.max_image_bytes,
        }
    }
}
