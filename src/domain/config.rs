use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Configuration for a bloodline registry.
///
/// This struct holds settings that control where collections are stored,
/// how their keys are named, and how long success notices stay on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Directory holding one JSON document per collection.
    ///
    /// Relative paths are resolved against the `.bloodline` directory.
    data_dir: PathBuf,

    /// Prefix prepended to every collection key.
    ///
    /// Lets several registries share one data directory. For example, a
    /// prefix of `site_a_` stores donors under `site_a_donors`.
    key_prefix: String,

    /// How long a success notice stays on screen, in milliseconds.
    ///
    /// Zero prints the notice as a plain line instead.
    notice_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key_prefix: String::new(),
            notice_duration_ms: default_notice_duration_ms(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to defaults if it is missing
    /// or unreadable.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The data directory, resolved against `base` if relative.
    #[must_use]
    pub fn data_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.data_dir)
    }

    /// The prefix prepended to collection keys.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Sets the collection key prefix.
    pub fn set_key_prefix(&mut self, key_prefix: String) {
        self.key_prefix = key_prefix;
    }

    /// How long success notices stay on screen.
    #[must_use]
    pub const fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

const fn default_notice_duration_ms() -> u64 {
    1800
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,

        #[serde(default, skip_serializing_if = "String::is_empty")]
        key_prefix: String,

        /// Zero disables the transient notice.
        #[serde(default = "default_notice_duration_ms")]
        notice_duration_ms: u64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_dir,
                key_prefix,
                notice_duration_ms,
            } => Self {
                data_dir,
                key_prefix,
                notice_duration_ms,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_dir: config.data_dir,
            key_prefix: config.key_prefix,
            notice_duration_ms: config.notice_duration_ms,
        }
    }
}
