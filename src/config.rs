//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{ClientConfig, DEFAULT_API_BASE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub hosted: HostedConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_chat_timeout")]
    pub chat_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_chat_timeout() -> u64 {
    95
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_timeout_secs: default_chat_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Request client settings for this backend
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            chat_timeout: Duration::from_secs(self.chat_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Hosted database configuration (both empty = not configured)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostedConfig {
    /// Project URL
    #[serde(default)]
    pub url: String,

    /// Publishable (anon) key
    #[serde(default)]
    pub anon_key: String,
}

impl HostedConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Local store configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Path of the state file (default: platform data directory)
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Files that exist but fail to load are skipped and returned so the
    /// caller can report them; logging is usually not set up yet.
    pub fn load_default() -> (Self, Vec<ConfigError>) {
        Self::load_first(&Self::default_paths())
    }

    fn load_first(paths: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut skipped = Vec::new();
        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {:?}", path);
                    return (config, skipped);
                }
                Err(e) => skipped.push(e),
            }
        }

        tracing::debug!("Using default config with environment overrides");
        (Self::from_env(), skipped)
    }

    /// Config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("moodmate").join("config.toml")),
            Some(PathBuf::from("./moodmate.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("MOODMATE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("MOODMATE_CHAT_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.api.chat_timeout_secs = secs;
        }
        if let Some(secs) = var("MOODMATE_REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.api.request_timeout_secs = secs;
        }

        // Hosted database overrides
        if let Some(url) = var("MOODMATE_HOSTED_URL") {
            self.hosted.url = url;
        }
        if let Some(key) = var("MOODMATE_HOSTED_ANON_KEY") {
            self.hosted.anon_key = key;
        }

        if let Some(path) = var("MOODMATE_STORE_PATH") {
            self.store.path = Some(path);
        }

        // Logging overrides
        if let Some(level) = var("MOODMATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MOODMATE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# MoodMate Configuration
#
# Environment variables override these settings:
# - MOODMATE_API_URL
# - MOODMATE_CHAT_TIMEOUT_SECS
# - MOODMATE_REQUEST_TIMEOUT_SECS
# - MOODMATE_HOSTED_URL
# - MOODMATE_HOSTED_ANON_KEY
# - MOODMATE_STORE_PATH
# - MOODMATE_LOG_LEVEL
# - MOODMATE_LOG_FORMAT

[api]
# Backend base URL
base_url = "http://localhost:3000/api"

# Timeout for the AI chat endpoint (seconds)
chat_timeout_secs = 95

# Timeout for every other request (seconds)
request_timeout_secs = 30

[hosted]
# Hosted database project URL and publishable key.
# Leave empty to use the REST backend only.
url = ""
anon_key = ""

[store]
# Where the auth token and user are kept
# path = "~/.local/share/moodmate/state.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"

# Optional log file path
# file = "/tmp/moodmate.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.chat_timeout_secs, 95);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(!config.hosted.is_configured());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, Config::default().api.base_url);
        assert_eq!(config.api.chat_timeout_secs, 95);
        assert!(config.store.path.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://mood.example/api\"\n\n[hosted]\nurl = \"https://p.example\"\nanon_key = \"k\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://mood.example/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.hosted.is_configured());

        let client = config.api.client_config();
        assert_eq!(client.chat_timeout, Duration::from_secs(95));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_skips_broken_file_and_reports_it() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        let missing = dir.path().join("missing.toml");
        std::fs::write(&broken, "[logging\nlevel = ").unwrap();
        std::fs::write(&good, "[logging]\nlevel = \"debug\"\n").unwrap();

        let (config, skipped) = Config::load_first(&[missing, broken.clone(), good]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(skipped.len(), 1);
        assert!(matches!(&skipped[0], ConfigError::Parse { path, .. } if *path == broken));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MOODMATE_API_URL", "http://10.0.0.2:3000/api"),
            ("MOODMATE_CHAT_TIMEOUT_SECS", "120"),
            ("MOODMATE_REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("MOODMATE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.2:3000/api");
        assert_eq!(config.api.chat_timeout_secs, 120);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
    }
}
