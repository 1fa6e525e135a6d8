//! Persisted user preferences (body model gender, sidebar visibility).
//!
//! Preferences are read once at startup through a [`KeyValueStore`] and written back on
//! every toggle. Values are plain strings so any key-value backend can hold them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

pub const GENDER_KEY: &str = "gender";
pub const SIDEBAR_OPEN_KEY: &str = "sidebar_open";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preferences I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which body model is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn other(self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(()),
        }
    }
}

/// String key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError>;
}

/// Volatile store, used when nothing should touch the disk.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the file, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let values = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    /// Open the file, starting empty if it is unreadable.
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(err) => {
                warn!("Ignoring preferences at {:?}: {}", path, err);
                Self {
                    path,
                    values: BTreeMap::new(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Startup preferences handed to the application root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub gender: Gender,
    pub sidebar_open: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            sidebar_open: true,
        }
    }
}

impl Preferences {
    /// Read preferences, falling back to defaults for missing or unrecognized values.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        let gender = store
            .get(GENDER_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.gender);
        let sidebar_open = store
            .get(SIDEBAR_OPEN_KEY)
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(defaults.sidebar_open);
        Self {
            gender,
            sidebar_open,
        }
    }

    pub fn set_gender(
        &mut self,
        store: &mut dyn KeyValueStore,
        gender: Gender,
    ) -> Result<(), PreferencesError> {
        self.gender = gender;
        store.set(GENDER_KEY, gender.as_str())?;
        info!(%gender, "saved gender preference");
        Ok(())
    }

    pub fn set_sidebar_open(
        &mut self,
        store: &mut dyn KeyValueStore,
        open: bool,
    ) -> Result<(), PreferencesError> {
        self.sidebar_open = open;
        store.set(SIDEBAR_OPEN_KEY, if open { "true" } else { "false" })?;
        info!(open, "saved sidebar preference");
        Ok(())
    }
}
