//! Runtime configuration loaded from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! [storage]
//! data_file = "data/memory.json"
//! notifications_file = "data/notifications.json"
//!
//! [reminders]
//! default_time_slots = ["09:00", "21:00"]
//!
//! [interactions]
//! table = "interactions.toml"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use medibuddy_contracts::error::{MediError, MediResult};
use medibuddy_core::DEFAULT_TIME_SLOTS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediConfig {
    pub storage: StorageConfig,
    pub reminders: ReminderConfig,
    pub interactions: InteractionConfigRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Patient and event document.
    pub data_file: PathBuf,
    /// Caregiver notification log.
    pub notifications_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/memory.json"),
            notifications_file: PathBuf::from("data/notifications.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Applied to medications that carry no `time_slots` of their own.
    pub default_time_slots: Vec<String>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_time_slots: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Where to load the interaction table from. `None` uses the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfigRef {
    pub table: Option<PathBuf>,
}

impl MediConfig {
    pub fn from_toml_str(s: &str) -> MediResult<Self> {
        toml::from_str(s).map_err(|e| MediError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> MediResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MediError::ConfigError {
            reason: format!("failed to read config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Point both storage files at `dir`, keeping their default file names.
    pub fn in_dir(dir: &Path) -> Self {
        let mut config = Self::default();
        config.storage.data_file = dir.join("memory.json");
        config.storage.notifications_file = dir.join("notifications.json");
        config
    }
}
