//! Configuration management for Lector.
//!
//! Values are layered: built-in defaults, then `~/.config/lector/config.toml`
//! if it exists, then environment variables (a `.env` file is honoured).
//! Everything has a safe default except the vocabulary connection string,
//! whose absence puts the vocabulary store in degraded mode.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sources::feed::DEFAULT_FEED_TIMEOUT;
use crate::sources::webhook::DEFAULT_WEBHOOK_TIMEOUT;

pub const ENV_WEBHOOK_URL: &str = "LECTOR_WEBHOOK_URL";
pub const ENV_WEBHOOK_TIMEOUT: &str = "LECTOR_WEBHOOK_TIMEOUT_SECS";
pub const ENV_FEED_URLS: &str = "LECTOR_FEED_URLS";
pub const ENV_VOCABULARY_URL: &str = "VOCABULARY_DB_URL";
pub const ENV_VOCABULARY_DB: &str = "VOCABULARY_DB_NAME";
pub const ENV_VOCABULARY_COLLECTION: &str = "VOCABULARY_COLLECTION";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub webhook: WebhookConfig,
    pub feeds: FeedsConfig,
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5678/webhook/news".to_string(),
            timeout_secs: DEFAULT_WEBHOOK_TIMEOUT.as_secs(),
        }
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// Ordered; only the first is fetched automatically.
    pub urls: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            urls: vec![
                "https://feeds.bbci.co.uk/news/technology/rss.xml".to_string(),
                "https://www.theverge.com/rss/index.xml".to_string(),
                "https://techcrunch.com/feed/".to_string(),
            ],
            timeout_secs: DEFAULT_FEED_TIMEOUT.as_secs(),
        }
    }
}

impl FeedsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// SQLite file, directory, or `:memory:`. `None` means degraded mode.
    pub url: Option<String>,
    pub database: String,
    pub collection: String,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            url: None,
            database: "cluster0".to_string(),
            collection: "words".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`, then apply
    /// `.env` and process environment overrides.
    ///
    /// A missing file at the default location is not an error; a missing
    /// explicit path, or an unreadable or invalid file, is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;

        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "no .env file loaded");
        }
        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    fn load_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let path = Self::default_config_path()?;
        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/lector/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("lector").join("config.toml"))
    }

    /// Overlay environment values. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_WEBHOOK_URL) {
            self.webhook.url = url;
        }
        if let Some(secs) = get(ENV_WEBHOOK_TIMEOUT) {
            self.webhook.timeout_secs =
                secs.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: ENV_WEBHOOK_TIMEOUT,
                    value: secs.clone(),
                })?;
        }
        if let Some(urls) = get(ENV_FEED_URLS) {
            self.feeds.urls = urls
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(url) = get(ENV_VOCABULARY_URL) {
            self.vocabulary.url = Some(url);
        }
        if let Some(db) = get(ENV_VOCABULARY_DB) {
            self.vocabulary.database = db;
        }
        if let Some(collection) = get(ENV_VOCABULARY_COLLECTION) {
            self.vocabulary.collection = collection;
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.webhook.timeout(), Duration::from_secs(10));
        assert_eq!(config.feeds.urls.len(), 3);
        assert!(config.vocabulary.url.is_none());
        assert_eq!(config.vocabulary.database, "cluster0");
        assert_eq!(config.vocabulary.collection, "words");
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
[webhook]
timeout_secs = 3

[vocabulary]
url = "/var/lib/lector"
"#;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.webhook.timeout_secs, 3);
        assert_eq!(config.webhook.url, WebhookConfig::default().url);
        assert_eq!(config.vocabulary.url.as_deref(), Some("/var/lib/lector"));
        assert_eq!(config.vocabulary.collection, "words");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.feeds.urls, FeedsConfig::default().urls);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                (ENV_WEBHOOK_URL, "https://hooks.example/news"),
                (ENV_WEBHOOK_TIMEOUT, "4"),
                (ENV_FEED_URLS, "https://a.example/rss, ,https://b.example/rss"),
                (ENV_VOCABULARY_URL, ":memory:"),
                (ENV_VOCABULARY_COLLECTION, "phrases"),
                (ENV_VOCABULARY_DB, ""),
            ]))
            .unwrap();

        assert_eq!(config.webhook.url, "https://hooks.example/news");
        assert_eq!(config.webhook.timeout(), Duration::from_secs(4));
        assert_eq!(
            config.feeds.urls,
            vec!["https://a.example/rss", "https://b.example/rss"]
        );
        assert_eq!(config.vocabulary.url.as_deref(), Some(":memory:"));
        assert_eq!(config.vocabulary.collection, "phrases");
        assert_eq!(config.vocabulary.database, "cluster0");
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[(ENV_WEBHOOK_TIMEOUT, "ten")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load_file(Some(path.as_path())),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lector.toml");
        fs::write(&path, "[vocabulary]\ncollection = \"phrases\"\n").unwrap();

        let config = Config::load_file(Some(path.as_path())).unwrap();
        assert_eq!(config.vocabulary.collection, "phrases");
    }

    #[test]
    fn test_from_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[webhook\nurl = 1").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
