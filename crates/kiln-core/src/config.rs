//! Configuration management for kiln
//!
//! Configuration file: ~/.config/kiln/config.yaml (or $KILN_CONFIG).
//! Directory values may use `~` and `$VAR` / `${VAR}`; they are expanded
//! when read, not when loaded, so the file round-trips unchanged.

use crate::error::{CliError, Result};
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global kiln configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Code generation settings
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Terminal output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where generated files go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Directory for SQL migrations, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Directory for Drift table classes, relative to the project root
    #[serde(default = "default_drift_dir")]
    pub drift_dir: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            drift_dir: default_drift_dir(),
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_drift_dir() -> String {
    "lib/database/tables".to_string()
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Colorize messages on stderr
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Paths::new().resolve_config_file())
    }

    /// Load configuration from a specific path, defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Migrations directory with `~` and environment variables expanded
    pub fn migrations_dir(&self) -> Result<PathBuf> {
        expand_path(&self.generate.migrations_dir)
    }

    /// Drift directory with `~` and environment variables expanded
    pub fn drift_dir(&self) -> Result<PathBuf> {
        expand_path(&self.generate.drift_dir)
    }
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(value: &str) -> Result<PathBuf> {
    shellexpand::full(value)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| CliError::Config(format!("cannot expand '{}': {}", value, e)))
}
