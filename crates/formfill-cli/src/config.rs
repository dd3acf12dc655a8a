//! Configuration management for the CLI.
//!
//! Display settings and extraction overrides live in
//! `~/.formfill/config.toml`. The API key is deliberately never written
//! here; it is supplied per session and held only in memory.

use crate::error::{CliError, Result};
use formfill_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction overrides
    #[serde(default)]
    pub extraction: ExtractionSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Overrides for the extraction pipeline; unset values use crate defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Model identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Quiet window in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_window_ms: Option<u64>,

    /// Provider request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::default(),
            history_size: default_history_size(),
        }
    }
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".formfill").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a specific path, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Build the effective extractor configuration from defaults plus
    /// file overrides.
    pub fn extractor_config(&self) -> ExtractorConfig {
        let mut config = ExtractorConfig::default();
        if let Some(model) = &self.extraction.model {
            config.model = model.clone();
        }
        if let Some(quiet_window_ms) = self.extraction.quiet_window_ms {
            config.quiet_window_ms = quiet_window_ms;
        }
        if let Some(request_timeout_secs) = self.extraction.request_timeout_secs {
            config.request_timeout_secs = request_timeout_secs;
        }
        config
    }
}
