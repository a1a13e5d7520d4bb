//! Configuration for the chat widget.
//!
//! Every field has a default so a partial (or empty) JSON file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Directory holding the widget's config file, relative to the working directory.
pub const CONFIG_DIR: &str = ".cryptochat";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding [`WidgetConfig::backend_url`].
pub const BACKEND_URL_ENV: &str = "CRYPTOCHAT_BACKEND_URL";

/// Widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base URL of the question-answering backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Timeout in seconds for a single chat request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay before the launcher reappears after the panel closes.
    #[serde(default = "default_launcher_delay_ms")]
    pub launcher_delay_ms: u64,

    /// Assistant message seeded into every new timeline.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Text shown by the typing placeholder.
    #[serde(default = "default_typing_label")]
    pub typing_label: String,

    /// Reply substituted for any backend failure.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_launcher_delay_ms() -> u64 {
    500
}

fn default_greeting() -> String {
    "Hi! I'm your crypto assistant. How can I help you today?".into()
}

fn default_typing_label() -> String {
    "typing...".into()
}

fn default_fallback_reply() -> String {
    "Sorry, an error occurred processing your request. Please try again.".into()
}

impl WidgetConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Apply `CRYPTOCHAT_BACKEND_URL` if it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend_url = url;
            }
        }
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Launcher hand-off delay as a [`Duration`].
    pub fn launcher_delay(&self) -> Duration {
        Duration::from_millis(self.launcher_delay_ms)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
            launcher_delay_ms: default_launcher_delay_ms(),
            greeting: default_greeting(),
            typing_label: default_typing_label(),
            fallback_reply: default_fallback_reply(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.launcher_delay(), Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.fallback_reply.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WidgetConfig =
            serde_json::from_str(r#"{"backend_url": "http://example.test"}"#).unwrap();
        assert_eq!(config.backend_url, "http://example.test");
        assert_eq!(config.launcher_delay_ms, 500);
        assert_eq!(config.typing_label, "typing...");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = WidgetConfig::default();
        config.launcher_delay_ms = 250;
        config.save(&path).unwrap();

        let loaded = WidgetConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = WidgetConfig::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = WidgetConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
