//! Configuration file management for TextLens.
//!
//! Reads `~/.config/textlens/config.toml`. A missing file yields defaults;
//! `TEXTLENS_BASE_URL` and `TEXTLENS_LANGUAGE` override the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use textlens_core::{DEFAULT_HISTORY_CAPACITY, DEFAULT_LANGUAGE, Result, TextLensError};

use crate::paths::TextLensPaths;

pub const ENV_BASE_URL: &str = "TEXTLENS_BASE_URL";
pub const ENV_LANGUAGE: &str = "TEXTLENS_LANGUAGE";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_ANALYZE_PATH: &str = "/api/analyze";

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLensConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Analysis backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub analyze_path: String,
    /// Language code sent with every request
    pub language: String,
    /// Request timeout. Unset means wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: None,
        }
    }
}

impl ServiceConfig {
    /// Full endpoint URL, joining base and path with exactly one slash.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.analyze_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// History persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    /// Overrides the default history file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            path: None,
        }
    }
}

impl TextLensConfig {
    /// Loads the configuration from `path`, falling back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TextLensError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            TextLensError::config(format!(
                "Failed to parse configuration file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Applies overrides from a variable lookup. Blank values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.service.base_url = base_url.trim().to_string();
        }
        if let Some(language) = lookup(ENV_LANGUAGE).filter(|v| !v.trim().is_empty()) {
            self.service.language = language.trim().to_string();
        }
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Resolved history file path: the configured one, else the default.
    pub fn history_path(&self) -> Result<PathBuf> {
        match &self.history.path {
            Some(path) => Ok(path.clone()),
            None => TextLensPaths::history_file().map_err(|e| TextLensError::config(e.to_string())),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Loads the configuration from its default location with environment
/// overrides applied.
pub fn load_config() -> Result<TextLensConfig> {
    let path = TextLensPaths::config_file().map_err(|e| TextLensError::config(e.to_string()))?;
    Ok(TextLensConfig::load_from(&path)?.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = TextLensConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();

        assert_eq!(config, TextLensConfig::default());
        assert_eq!(config.service.endpoint(), "http://localhost:3000/api/analyze");
        assert_eq!(config.service.language, "en");
        assert_eq!(config.service.timeout(), None);
        assert_eq!(config.history.capacity, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[service]
base_url = "https://nlp.example.com/"
timeout_secs = 30

[history]
path = "/tmp/textlens-history.json"
"#,
        )
        .unwrap();

        let config = TextLensConfig::load_from(&path).unwrap();
        assert_eq!(config.service.endpoint(), "https://nlp.example.com/api/analyze");
        assert_eq!(config.service.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.history.capacity, 10);
        assert_eq!(
            config.history_path().unwrap(),
            PathBuf::from("/tmp/textlens-history.json")
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[service\nbase_url = ").unwrap();

        let err = TextLensConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, TextLensError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_BASE_URL, " http://10.0.0.5:8080 "), (ENV_LANGUAGE, "   ")]);

        let config = TextLensConfig::default()
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.service.base_url, "http://10.0.0.5:8080");
        assert_eq!(config.service.language, "en");
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = TextLensConfig::default();
        config.service.timeout_secs = Some(5);
        let text = config.to_toml().unwrap();
        let parsed: TextLensConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
