//! Configuration for embedding the BeFit core.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-specific errors
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BefitConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl BefitConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::TomlParse(e.to_string()))
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::TomlSerialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Database configuration for SQLite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the database directory.
    pub path: PathBuf,
}

impl DatabaseConfig {
    /// Path to the database file.
    pub fn befit_db(&self) -> PathBuf {
        self.path.join("befit.db")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("befit-data"),
        }
    }
}

/// Startup seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Email of the seed administrator account.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Whether to seed the default exercise-type catalog when empty.
    #[serde(default = "default_true")]
    pub seed_catalog: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            seed_catalog: true,
        }
    }
}

fn default_admin_email() -> String {
    "admin@befit.local".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("befit.toml");

        let mut config = BefitConfig::default();
        config.bootstrap.admin_email = "root@example.test".to_string();
        config.save(&path).unwrap();

        let loaded = BefitConfig::load(&path).unwrap();
        assert_eq!(loaded.bootstrap.admin_email, "root@example.test");
        assert!(loaded.bootstrap.seed_catalog);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = BefitConfig::load_or_default("/nonexistent/befit.toml").unwrap();
        assert_eq!(config.bootstrap.admin_email, "admin@befit.local");
        assert_eq!(config.database.befit_db(), PathBuf::from("befit-data/befit.db"));
    }
}
