//! Client configuration file.
//!
//! Settings are stored as TOML in the platform config directory, e.g.
//! `~/.config/cardio/config.toml` on Linux. A missing default file means
//! defaults; a missing file passed with `--config` is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use cardio_client::ApiConfig;

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub report: ReportSettings,
}

/// Where reports go and whether they are opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Directory for charts and reports.
    pub output_dir: PathBuf,
    /// Open the report with the system viewer after writing it.
    pub open: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            open: true,
        }
    }
}

/// Default configuration file location, if the platform has one.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "CardioRisk", "cardio")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl AppConfig {
    /// Load from `explicit`, or from the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => {
                tracing::warn!("could not determine config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize config")
    }
}
