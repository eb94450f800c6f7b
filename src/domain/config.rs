use std::path::Path;

use serde::{Deserialize, Serialize};

/// Conventional name of the configuration file.
pub const CONFIG_FILENAME: &str = "taxa.toml";

/// Configuration for hierarchy management.
///
/// Persisted as TOML ([`CONFIG_FILENAME`] by convention). Every field has a
/// default, so a missing or partial file is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filename the exporter writes when no explicit target is given.
    pub export_filename: String,

    /// Whether imported data may carry type labels outside the known set.
    ///
    /// When `true` (the default), unrecognised labels are preserved
    /// verbatim. When `false`, imports containing them are rejected.
    pub allow_unrecognised: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_filename: "hierarchy.csv".to_string(),
            allow_unrecognised: true,
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

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Loads the configuration at `path`, falling back to the defaults when
    /// the file does not exist or cannot be parsed.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!("{err}; using default configuration");
            Self::default()
        })
    }
}
