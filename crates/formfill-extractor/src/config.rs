//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model identifier sent with every request
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";

/// Default quiet window before a text change triggers extraction
pub const DEFAULT_QUIET_WINDOW_MS: u64 = 300;

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Model identifier sent with every request
    pub model: String,

    /// Quiet window in milliseconds before a settled text change fires
    pub quiet_window_ms: u64,

    /// Maximum time for a single provider call (seconds)
    pub request_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the quiet window as a Duration
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.quiet_window_ms)
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.quiet_window_ms == 0 {
            return Err("quiet_window_ms must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            quiet_window_ms: DEFAULT_QUIET_WINDOW_MS,
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quiet_window(), Duration::from_millis(300));
    }

    #[test]
    fn test_empty_model_is_invalid() {
        let mut config = ExtractorConfig::default();
        config.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_quiet_window_is_invalid() {
        let mut config = ExtractorConfig::default();
        config.quiet_window_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.model, parsed.model);
        assert_eq!(config.quiet_window_ms, parsed.quiet_window_ms);
        assert_eq!(config.request_timeout_secs, parsed.request_timeout_secs);
    }
}
